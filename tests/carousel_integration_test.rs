use site_fx::domain::ports::{DisplayUnit, Scheduler};
use site_fx::{CarouselController, ManualScheduler, ReviewCard, SiteError, TokioScheduler};
use std::sync::Arc;
use std::time::Duration;

fn cards(n: usize) -> Vec<ReviewCard> {
    (0..n)
        .map(|i| ReviewCard::new(format!("Guest {}", i), "Lovely trip"))
        .collect()
}

fn active_indices(controller: &CarouselController<ReviewCard>) -> Vec<usize> {
    controller.inspect(|c| {
        c.items()
            .iter()
            .enumerate()
            .filter(|(_, card)| card.active)
            .map(|(i, _)| i)
            .collect()
    })
}

#[test]
fn test_construction_activates_first_card() {
    let controller = CarouselController::new(cards(3)).unwrap();
    assert_eq!(controller.current_index(), 0);
    assert_eq!(active_indices(&controller), vec![0]);
}

#[test]
fn test_go_to_and_rejection() {
    let controller = CarouselController::new(cards(4)).unwrap();
    controller.go_to(3).unwrap();
    assert_eq!(active_indices(&controller), vec![3]);

    let err = controller.go_to(4).unwrap_err();
    assert!(matches!(err, SiteError::IndexOutOfRange { index: 4, len: 4 }));
    assert_eq!(controller.current_index(), 3);

    assert_eq!(controller.advance(), 0);
    assert_eq!(active_indices(&controller), vec![0]);
}

#[test]
fn test_empty_controller_rejected() {
    let result = CarouselController::<ReviewCard>::new(Vec::new());
    assert!(matches!(result, Err(SiteError::EmptyCarousel)));
}

#[test]
fn test_auto_rotate_on_virtual_clock() {
    let clock = ManualScheduler::new();
    let controller = CarouselController::new(cards(3)).unwrap();
    controller.start_auto_rotate(&clock, Duration::from_millis(5000));

    clock.advance(Duration::from_millis(4999));
    assert_eq!(controller.current_index(), 0);

    clock.advance(Duration::from_millis(1));
    assert_eq!(controller.current_index(), 1);

    clock.advance(Duration::from_millis(10_000));
    assert_eq!(controller.current_index(), 0);
    assert_eq!(active_indices(&controller), vec![0]);
}

#[test]
fn test_manual_click_does_not_reset_rotation() {
    let clock = ManualScheduler::new();
    let controller = CarouselController::new(cards(5)).unwrap();
    controller.start_auto_rotate(&clock, Duration::from_millis(5000));

    // 計時器觸發前 100ms 手動切換，接著計時器又切一次
    clock.advance_to(Duration::from_millis(4900));
    controller.advance();
    assert_eq!(controller.current_index(), 1);

    clock.advance_to(Duration::from_millis(5000));
    assert_eq!(controller.current_index(), 2);
}

#[test]
fn test_rotation_handle_can_stop_timer() {
    let clock = ManualScheduler::new();
    let controller = CarouselController::new(cards(3)).unwrap();
    let handle = controller.start_auto_rotate(&clock, Duration::from_millis(1000));

    clock.advance(Duration::from_millis(1000));
    handle.cancel();
    clock.advance(Duration::from_millis(10_000));
    assert_eq!(controller.current_index(), 1);
}

#[test]
fn test_dropping_handle_keeps_rotating() {
    let clock = ManualScheduler::new();
    let controller = CarouselController::new(cards(3)).unwrap();
    drop(controller.start_auto_rotate(&clock, Duration::from_millis(1000)));

    clock.advance(Duration::from_millis(2000));
    assert_eq!(controller.current_index(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_auto_rotate_on_tokio_timers() {
    let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::try_current().unwrap());
    let controller = CarouselController::new(cards(3)).unwrap();
    controller.start_auto_rotate(&scheduler, Duration::from_millis(5000));

    tokio::time::sleep(Duration::from_millis(5500)).await;
    assert_eq!(controller.current_index(), 1);

    controller.retreat();
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(controller.current_index(), 1);
}

#[derive(Debug, Default)]
struct Counter {
    active: bool,
    shows: usize,
}

impl DisplayUnit for Counter {
    fn set_active(&mut self, active: bool) {
        if active && !self.active {
            self.shows += 1;
        }
        self.active = active;
    }
}

#[test]
fn test_each_card_shown_once_per_cycle() {
    let controller = CarouselController::new((0..4).map(|_| Counter::default()).collect()).unwrap();
    for _ in 0..4 {
        controller.advance();
    }
    let shows: Vec<usize> = controller.inspect(|c| c.items().iter().map(|u| u.shows).collect());
    // 第一張在建構時已顯示一次
    assert_eq!(shows, vec![2, 1, 1, 1]);
}
