#[cfg(test)]
mod tests {
    use std::io;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tokio::sync::mpsc::error::TryRecvError;
    use tokio::sync::mpsc::Receiver;

    use crate::actor_framework::{FrameworkError, ResourceRequest};
    use crate::app_system::{seed, Storefront, StorefrontError, StorefrontSystem};
    use crate::cart_store::{
        CartRepository, CartStore, CartStoreError, KeyValueStorage, MemoryStorage, CART_KEY,
    };
    use crate::checkout::{CheckoutError, CheckoutRequest, CheckoutService};
    use crate::dish_actor::DishPatch;
    use crate::clients::{OrderClient, RestaurantClient, UserClient};
    use crate::domain::{
        Cart, CartError, CartLine, Order, OrderStatus, PaymentMethod, Restaurant, User, UserRole,
    };
    use crate::mock_framework::{create_mock_client, expect_create, expect_get, expect_list};
    use crate::order_actor::OrderError;
    use crate::session::{AuthError, Session};

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn user(id: &str, role: UserRole) -> User {
        User {
            id: id.into(),
            full_name: "Asha Rao".into(),
            email: "asha@campus.edu".into(),
            phone: None,
            role,
            wallet_balance: Decimal::ZERO,
            reward_points: 0,
        }
    }

    fn restaurant(id: &str, is_open: bool) -> Restaurant {
        Restaurant {
            id: id.into(),
            name: "Spice Route".into(),
            description: None,
            cuisine_type: Some("Indian".into()),
            rating: 4.5,
            preparation_time: 20,
            image_url: None,
            is_open,
            address: "Student Union".into(),
        }
    }

    fn cart_line(id: &str, price: &str, quantity: u32) -> CartLine {
        CartLine {
            id: id.into(),
            name: id.into(),
            description: None,
            price: d(price),
            image_url: None,
            quantity,
            restaurant_id: "r1".into(),
        }
    }

    fn paneer_and_naan() -> Cart {
        Cart::from_lines(vec![cart_line("paneer", "180.00", 2), cart_line("naan", "40.00", 3)]).unwrap()
    }

    /// Memory storage whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: AtomicBool,
    }

    impl KeyValueStorage for FlakyStorage {
        fn read(&self, key: &str) -> Result<Option<String>, CartStoreError> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, value: &str) -> Result<(), CartStoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
            }
            self.inner.write(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), CartStoreError> {
            self.inner.remove(key)
        }
    }

    struct Harness {
        checkout: CheckoutService,
        session: Session,
        carts: Arc<CartStore<MemoryStorage>>,
        user_rx: Receiver<ResourceRequest<User>>,
        restaurant_rx: Receiver<ResourceRequest<Restaurant>>,
        order_rx: Receiver<ResourceRequest<Order>>,
    }

    fn harness() -> Harness {
        let (user_inner, user_rx) = create_mock_client::<User>(10);
        let (restaurant_inner, restaurant_rx) = create_mock_client::<Restaurant>(10);
        let (order_inner, order_rx) = create_mock_client::<Order>(10);

        let session = Session::new(UserClient::new(user_inner));
        let order_client = OrderClient::new(order_inner, RestaurantClient::new(restaurant_inner));
        let carts = Arc::new(CartStore::new(MemoryStorage::new()));
        let checkout = CheckoutService::new(session.clone(), carts.clone(), order_client);

        Harness {
            checkout,
            session,
            carts,
            user_rx,
            restaurant_rx,
            order_rx,
        }
    }

    async fn sign_in(h: &mut Harness) {
        let session = h.session.clone();
        let task = tokio::spawn(async move { session.sign_in("asha@campus.edu").await });

        let (filter, responder) = expect_list(&mut h.user_rx).await.expect("Expected User List");
        assert_eq!(filter.email.as_deref(), Some("asha@campus.edu"));
        responder.send(Ok(vec![user("u1", UserRole::Student)])).unwrap();

        task.await.unwrap().unwrap();
    }

    fn submit(h: &Harness) -> tokio::task::JoinHandle<Result<crate::checkout::PlacedOrder, CheckoutError>> {
        let checkout = h.checkout.clone();
        tokio::spawn(async move {
            checkout
                .submit(CheckoutRequest {
                    payment_method: PaymentMethod::Card,
                    special_instructions: Some("No onions".into()),
                })
                .await
        })
    }

    #[tokio::test]
    async fn test_checkout_writes_order_with_lines_and_clears_cart() {
        let mut h = harness();
        sign_in(&mut h).await;
        h.carts.save(&paneer_and_naan()).unwrap();

        let task = submit(&h);

        let (restaurant_id, responder) = expect_get(&mut h.restaurant_rx).await.expect("Expected Restaurant Get");
        assert_eq!(restaurant_id, "r1");
        responder.send(Ok(Some(restaurant("r1", true)))).unwrap();

        let (payload, responder) = expect_create(&mut h.order_rx).await.expect("Expected Order Create");
        assert_eq!(payload.user_id, "u1");
        assert_eq!(payload.restaurant_id, "r1");
        assert_eq!(payload.total_amount, d("504.00"));
        assert_eq!(payload.payment_method, PaymentMethod::Card);
        assert_eq!(payload.special_instructions.as_deref(), Some("No onions"));
        assert!(payload.pickup_code.starts_with("QR-"));
        let lines: Vec<_> = payload
            .lines
            .iter()
            .map(|l| (l.dish_id.as_str(), l.quantity, l.unit_price))
            .collect();
        assert_eq!(lines, vec![("paneer", 2, d("180.00")), ("naan", 3, d("40.00"))]);
        responder.send(Ok("order_1".to_string())).unwrap();

        let placed = task.await.unwrap().unwrap();
        assert_eq!(placed.order_id, "order_1");
        assert_eq!(placed.pickup_code, payload.pickup_code);
        assert_eq!(placed.summary.subtotal, d("480.00"));
        assert_eq!(placed.summary.tax, d("24.00"));
        assert_eq!(placed.summary.total, d("504.00"));
        assert!(h.carts.load().is_empty());
    }

    #[tokio::test]
    async fn test_failed_order_write_keeps_cart() {
        let mut h = harness();
        sign_in(&mut h).await;
        h.carts.save(&paneer_and_naan()).unwrap();

        let task = submit(&h);

        let (_, responder) = expect_get(&mut h.restaurant_rx).await.expect("Expected Restaurant Get");
        responder.send(Ok(Some(restaurant("r1", true)))).unwrap();
        let (_, responder) = expect_create(&mut h.order_rx).await.expect("Expected Order Create");
        responder
            .send(Err(FrameworkError::Rejected("insert failed".into())))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, CheckoutError::Order(OrderError::ValidationError(ref m)) if m == "insert failed"));
        assert_eq!(h.carts.load(), paneer_and_naan());
    }

    #[tokio::test]
    async fn test_empty_cart_makes_no_backend_request() {
        let mut h = harness();
        sign_in(&mut h).await;

        let err = submit(&h).await.unwrap().unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert_eq!(h.restaurant_rx.try_recv().unwrap_err(), TryRecvError::Empty);
        assert_eq!(h.order_rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_stored_cart_spanning_restaurants_never_reaches_backend() {
        let mut h = harness();
        sign_in(&mut h).await;
        let mixed = r#"{"version":1,"lines":[
            {"id":"paneer","name":"Paneer Tikka","description":null,"price":"180.00","image_url":null,"quantity":1,"restaurant_id":"r1"},
            {"id":"momos","name":"Veg Momos","description":null,"price":"90.00","image_url":null,"quantity":1,"restaurant_id":"r2"}
        ]}"#;
        h.carts.storage().write(CART_KEY, mixed).unwrap();

        let err = submit(&h).await.unwrap().unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert_eq!(h.restaurant_rx.try_recv().unwrap_err(), TryRecvError::Empty);
        assert_eq!(h.order_rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn test_checkout_requires_sign_in() {
        let mut h = harness();
        h.carts.save(&paneer_and_naan()).unwrap();

        let err = submit(&h).await.unwrap().unwrap_err();
        assert!(matches!(err, CheckoutError::NotSignedIn));
        assert_eq!(err.to_string(), "Please sign in to continue");
        assert_eq!(h.order_rx.try_recv().unwrap_err(), TryRecvError::Empty);
        assert_eq!(h.carts.load(), paneer_and_naan());
    }

    #[tokio::test]
    async fn test_unknown_or_closed_restaurant_is_refused() {
        let mut h = harness();
        sign_in(&mut h).await;
        h.carts.save(&paneer_and_naan()).unwrap();

        let task = submit(&h);
        let (_, responder) = expect_get(&mut h.restaurant_rx).await.expect("Expected Restaurant Get");
        responder.send(Ok(None)).unwrap();
        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidRestaurant(ref id) if id == "r1"));

        let task = submit(&h);
        let (_, responder) = expect_get(&mut h.restaurant_rx).await.expect("Expected Restaurant Get");
        responder.send(Ok(Some(restaurant("r1", false)))).unwrap();
        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, CheckoutError::Order(OrderError::RestaurantClosed(_))));

        assert_eq!(h.order_rx.try_recv().unwrap_err(), TryRecvError::Empty);
        assert_eq!(h.carts.load(), paneer_and_naan());
    }

    #[tokio::test]
    async fn test_unknown_email_cannot_sign_in() {
        let mut h = harness();
        let session = h.session.clone();
        let task = tokio::spawn(async move { session.sign_in("ghost@campus.edu").await });

        let (_, responder) = expect_list(&mut h.user_rx).await.expect("Expected User List");
        responder.send(Ok(vec![])).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(AuthError::UnknownUser("ghost@campus.edu".into()))
        );
        assert_eq!(h.session.current().await, Err(AuthError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_storefront_end_to_end() {
        let system = StorefrontSystem::start(8);
        let catalog = seed::seed_demo_catalog(&system).await.unwrap();
        let storefront = Storefront::from_system(&system, Arc::new(CartStore::new(MemoryStorage::new())));

        let spice_route = &catalog.restaurant_ids[0];
        let paneer = &catalog.dish_ids[0][0];
        let naan = &catalog.dish_ids[0][3];
        let noodles = &catalog.dish_ids[1][0];

        // Browsing works signed out; cart mutation does not.
        assert_eq!(storefront.featured_restaurants().await.unwrap().len(), 2);
        let found = storefront.browse_restaurants("SPICE", Some("all")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(storefront.browse_restaurants("", Some("Thai")).await.unwrap().is_empty());
        let chinese = storefront.browse_restaurants("", Some("Chinese")).await.unwrap();
        assert_eq!(chinese.len(), 1);
        assert_eq!(chinese[0].name, "Noodle Bar");
        assert!(storefront.browse_restaurants("noodle", Some("Indian")).await.unwrap().is_empty());
        let menu = storefront.restaurant_menu(spice_route).await.unwrap();
        let categories: Vec<_> = menu.sections.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["Starters", "Mains", "Breads"]);
        assert!(matches!(
            storefront.add_to_cart(paneer).await,
            Err(StorefrontError::Auth(AuthError::NotSignedIn))
        ));

        storefront.sign_in(seed::DEMO_STUDENT_EMAIL).await.unwrap();
        storefront.add_to_cart(paneer).await.unwrap();
        storefront.add_to_cart(paneer).await.unwrap();
        for _ in 0..3 {
            storefront.add_to_cart(naan).await.unwrap();
        }
        assert!(matches!(
            storefront.add_to_cart(noodles).await,
            Err(StorefrontError::Cart(CartError::RestaurantMismatch { .. }))
        ));
        assert_eq!(storefront.cart().item_count(), 5);
        assert_eq!(storefront.cart_summary().total, d("504.00"));

        let placed = storefront
            .checkout(CheckoutRequest::default())
            .await
            .unwrap();
        assert_eq!(placed.summary.total, d("504.00"));
        assert!(storefront.cart().is_empty());

        let history = storefront.order_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].restaurant_name.as_deref(), Some("Spice Route"));
        assert_eq!(history[0].status, OrderStatus::Pending);
        assert_eq!(history[0].pickup_code, None);
        assert_eq!(history[0].reference, placed.order_id[..8]);
        assert_eq!(history[0].lines[0].dish_name.as_deref(), Some("Paneer Tikka"));

        system
            .order_client
            .update_status(placed.order_id.clone(), OrderStatus::Ready)
            .await
            .unwrap();
        let history = storefront.order_history().await.unwrap();
        assert_eq!(history[0].pickup_code.as_deref(), Some(placed.pickup_code.as_str()));

        // Switching restaurants is an explicit replace.
        let cart = storefront.replace_cart_with(noodles).await.unwrap();
        assert_eq!(cart.restaurant_id(), Some(catalog.restaurant_ids[1].as_str()));
        assert_eq!(cart.item_count(), 1);

        let profile = storefront
            .update_profile(None, Some("98765 43210".into()))
            .await
            .unwrap();
        assert_eq!(profile.phone.as_deref(), Some("98765 43210"));
        assert_eq!(storefront.profile().await.unwrap(), profile);

        assert!(matches!(
            storefront.admin_dashboard().await,
            Err(StorefrontError::Auth(AuthError::Forbidden(UserRole::Admin)))
        ));
        storefront.sign_in(seed::DEMO_ADMIN_EMAIL).await.unwrap();
        let stats = storefront.admin_dashboard().await.unwrap();
        assert_eq!((stats.restaurants, stats.dishes, stats.orders, stats.users), (2, 7, 1, 2));

        // Catalog changes pushed by restaurant partners.
        system
            .dish_client
            .update_dish(naan.clone(), DishPatch { is_available: Some(false), ..Default::default() })
            .await
            .unwrap();
        let naan_hits = storefront.search_menu(spice_route, "flatbread").await.unwrap();
        assert_eq!(naan_hits.len(), 1);
        assert!(!naan_hits[0].is_available);
        storefront.replace_cart_with(paneer).await.unwrap();
        assert!(matches!(
            storefront.add_to_cart(naan).await,
            Err(StorefrontError::Cart(CartError::DishUnavailable(_)))
        ));

        system
            .restaurant_client
            .set_open(catalog.restaurant_ids[1].clone(), false)
            .await
            .unwrap();
        assert_eq!(storefront.featured_restaurants().await.unwrap().len(), 1);

        drop(storefront);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_only_own_orders() {
        let system = StorefrontSystem::start(8);
        let catalog = seed::seed_demo_catalog(&system).await.unwrap();
        let storefront = Storefront::from_system(&system, Arc::new(CartStore::new(MemoryStorage::new())));
        let paneer = &catalog.dish_ids[0][0];
        let momos = &catalog.dish_ids[1][2];

        storefront.sign_in(seed::DEMO_ADMIN_EMAIL).await.unwrap();
        storefront.add_to_cart(momos).await.unwrap();
        let others = storefront.checkout(CheckoutRequest::default()).await.unwrap();

        storefront.sign_in(seed::DEMO_STUDENT_EMAIL).await.unwrap();
        let mut placed = Vec::new();
        for _ in 0..3 {
            storefront.add_to_cart(paneer).await.unwrap();
            placed.push(storefront.checkout(CheckoutRequest::default()).await.unwrap().order_id);
        }

        let history: Vec<_> = storefront
            .order_history()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.order_id)
            .collect();
        placed.reverse();
        assert_eq!(history, placed);
        assert!(!history.contains(&others.order_id));

        drop(storefront);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_cart_replace_keeps_previous_cart() {
        let system = StorefrontSystem::start(8);
        let catalog = seed::seed_demo_catalog(&system).await.unwrap();
        let carts = Arc::new(CartStore::new(FlakyStorage::default()));
        let storefront = Storefront::from_system(&system, carts.clone());
        let paneer = &catalog.dish_ids[0][0];
        let noodles = &catalog.dish_ids[1][0];

        storefront.sign_in(seed::DEMO_STUDENT_EMAIL).await.unwrap();
        let before = storefront.add_to_cart(paneer).await.unwrap();

        carts.storage().fail_writes.store(true, Ordering::SeqCst);
        assert!(matches!(
            storefront.replace_cart_with(noodles).await,
            Err(StorefrontError::CartStore(_))
        ));
        assert_eq!(storefront.cart(), before);

        carts.storage().fail_writes.store(false, Ordering::SeqCst);
        let after = storefront.replace_cart_with(noodles).await.unwrap();
        assert_eq!(storefront.cart(), after);
        assert_eq!(after.restaurant_id(), Some(catalog.restaurant_ids[1].as_str()));

        drop(storefront);
        system.shutdown().await.unwrap();
    }
}
