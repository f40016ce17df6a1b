use std::pin::Pin;
use std::sync::Arc;
use std::task::Poll;
use tokio::sync::Mutex;
use tower::{Layer, Service, ServiceExt};
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::types::Request;

/// Turns text lines into `Request`s for the inner service.
///
/// Lines that do not parse and requests the dispatcher rejects are logged and
/// answered with `None`; only invariant failures surface as errors.
pub struct InputService<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> InputService<S> {
    fn new(inner: S) -> Self {
        InputService {
            inner: Arc::new(Mutex::new(inner)),
        }
    }
}

impl<S> Service<String> for InputService<S>
where
    S: Service<Request, Error = DispatchError> + Send + 'static,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
{
    type Response = Option<S::Response>;
    type Error = DispatchError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, line: String) -> Self::Future {
        let maybe_request = Request::try_from(line.as_str());
        let inner = self.inner.clone();

        Box::pin(async move {
            let request = match maybe_request {
                Ok(request) => request,
                Err(e) => {
                    warn!(line = %line.trim(), "invalid request: {e:#}");
                    return Ok(None);
                }
            };
            debug!(?request, "request received");

            let mut svc = inner.lock().await;
            let result = match svc.ready().await {
                Ok(ready) => ready.call(request).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(response) => Ok(Some(response)),
                Err(e) if e.is_rejection() => {
                    warn!(error = %e, "request rejected");
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        })
    }
}

pub struct InputLayer;

impl<S> Layer<S> for InputLayer {
    type Service = InputService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        InputService::new(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{Assignment, Dispatcher};
    use crate::services::dispatch::{DispatchService, Response};
    use crate::types::FloorRange;
    use tower::ServiceBuilder;

    fn stack() -> InputService<DispatchService> {
        let dispatcher = Dispatcher::new(2, FloorRange::new(0, 10).unwrap());
        ServiceBuilder::new()
            .layer(InputLayer)
            .service(DispatchService::new(dispatcher))
    }

    async fn send(svc: &mut InputService<DispatchService>, line: &str) -> Option<Response> {
        svc.ready().await.unwrap().call(line.to_string()).await.unwrap()
    }

    #[tokio::test]
    async fn lines_reach_the_dispatcher() {
        let mut svc = stack();
        let response = send(&mut svc, "U 5\n").await;
        assert!(matches!(
            response,
            Some(Response::Hall(Assignment::Car { car: 1, .. }))
        ));
    }

    #[tokio::test]
    async fn garbage_and_rejections_are_swallowed() {
        let mut svc = stack();
        assert_eq!(send(&mut svc, "bogus").await, None);
        assert_eq!(send(&mut svc, "U 99").await, None);
        assert_eq!(send(&mut svc, "H 3").await, None);
        assert_eq!(send(&mut svc, "P 3").await, None);
        assert_eq!(send(&mut svc, "P 9 3").await, None);

        let Some(Response::Cars(cars)) = send(&mut svc, "L").await else {
            panic!("expected car listing");
        };
        assert!(cars.iter().all(|c| c.pending_stops.is_empty()));
    }
}
