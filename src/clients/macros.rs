/// Generates the table accessors every client shares:
/// `get_<entity>`, `delete_<entity>`, `list_<entities>` and `count_<entities>`.
///
/// Framework failures are mapped through the error type's `From<FrameworkError>`.
#[macro_export]
macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident, $plural_snake:ident) => {
        paste::paste! {
            #[allow(dead_code)]
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $entity_name_snake>](&self, id: String) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.get(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $entity_name_snake>](&self, id: String) -> Result<(), $error> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $plural_snake>](
                    &self,
                    filter: <$entity as $crate::actor_framework::Entity>::Filter,
                ) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.inner.list(filter).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<count_ $plural_snake>](&self) -> Result<usize, $error> {
                    tracing::debug!("Sending request");
                    self.inner.count().await.map_err(<$error>::from)
                }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(inner: $crate::actor_framework::ResourceClient<$entity>) -> Self {
                Self { inner }
            }
        }
    };
}

#[macro_export]
macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $error:ty, $entity_name_snake:ident, $plural_snake:ident) => {
        $crate::impl_client_new!($client_name, $entity);
        $crate::impl_client_methods!($client_name, $entity, $error, $entity_name_snake, $plural_snake);
    };
}
