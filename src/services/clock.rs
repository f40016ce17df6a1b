use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower::{Service, ServiceExt};
use tracing::{error, trace};

use crate::error::DispatchError;
use crate::services::dispatch::DispatchService;
use crate::strategy::Strategy;
use crate::types::Request;

/// Advances the fleet once per `period` until the dispatcher reports an error.
pub fn spawn_clock<ST: Strategy>(
    service: DispatchService<ST>,
    period: Duration,
) -> JoinHandle<Result<(), DispatchError>> {
    tokio::spawn(run(service, period))
}

async fn run<ST: Strategy>(
    mut service: DispatchService<ST>,
    period: Duration,
) -> Result<(), DispatchError> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        trace!("clock tick");
        if let Err(e) = service.ready().await?.call(Request::AdvanceClock).await {
            error!(error = %e, "clock stopped");
            return Err(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use crate::services::dispatch::Response;
    use crate::types::FloorRange;

    #[tokio::test(start_paused = true)]
    async fn clock_drives_cars_to_their_stops() {
        let service = DispatchService::new(Dispatcher::new(1, FloorRange::new(0, 10).unwrap()));
        service
            .clone()
            .oneshot(Request::CabCall { car: Some(1), floor: 3 })
            .await
            .unwrap();

        let clock = spawn_clock(service.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        clock.abort();

        let response = service.oneshot(Request::ListCars).await.unwrap();
        let Response::Cars(cars) = response else {
            panic!("unexpected response {response:?}");
        };
        assert_eq!(cars[0].current_floor, 3);
        assert!(cars[0].pending_stops.is_empty());
    }
}
