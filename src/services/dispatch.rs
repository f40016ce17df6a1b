use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::Mutex;
use tower::Service;

use crate::car::{CarState, Step};
use crate::dispatcher::{Assignment, Dispatcher};
use crate::error::DispatchError;
use crate::strategies::LeastDetour;
use crate::strategy::Strategy;
use crate::types::{CarId, HallCall, Request, StopOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Hall(Assignment),
    Cab(StopOutcome),
    Cars(Vec<CarState>),
    Pending(Vec<HallCall>),
    Advanced(Vec<(CarId, Step)>),
    Released,
}

/// Shared handle to one dispatcher. Clones talk to the same fleet, and every
/// request runs start to finish under the same lock.
pub struct DispatchService<ST = LeastDetour> {
    dispatcher: Arc<Mutex<Dispatcher<ST>>>,
}

impl<ST> Clone for DispatchService<ST> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<ST: Strategy> DispatchService<ST> {
    pub fn new(dispatcher: Dispatcher<ST>) -> Self {
        Self {
            dispatcher: Arc::new(Mutex::new(dispatcher)),
        }
    }

    fn apply(dispatcher: &mut Dispatcher<ST>, request: Request) -> Result<Response, DispatchError> {
        match request {
            Request::HallCall { floor, direction } => dispatcher
                .submit_hall_call(floor, direction)
                .map(Response::Hall),
            Request::CabCall { car, floor } => {
                dispatcher.submit_cab_call(car, floor).map(Response::Cab)
            }
            Request::ListCars => Ok(Response::Cars(dispatcher.list_cars())),
            Request::ListPending => Ok(Response::Pending(dispatcher.list_pending())),
            Request::AdvanceClock => dispatcher.advance_clock().map(Response::Advanced),
            Request::Release(car) => dispatcher.release_car(car).map(|()| Response::Released),
        }
    }
}

impl<ST: Strategy> Service<Request> for DispatchService<ST> {
    type Response = Response;
    type Error = DispatchError;
    type Future = Pin<Box<dyn Future<Output = Result<Response, DispatchError>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let dispatcher = Arc::clone(&self.dispatcher);
        Box::pin(async move {
            let mut guard = dispatcher.lock().await;
            Self::apply(&mut guard, request)
        })
    }
}
