/// Generate a client method that sends one request to the gateway and awaits
/// its oneshot response, with tracing on every call.
///
/// A closed channel means the gateway has shut down; a dropped responder
/// means it went away mid-request. Both surface as
/// `ApiError::ActorCommunicationError`.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::gateway::ApiError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::gateway::ApiError::ActorCommunicationError("Gateway closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::gateway::ApiError::ActorCommunicationError("Gateway dropped".to_string()))?
            }
        }
    };
}
