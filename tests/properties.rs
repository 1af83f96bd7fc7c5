//! Property tests over arbitrary replacement sequences.

use hotswap_handler::prelude::{Handler, HandlerCell, async_trait};
use proptest::prelude::*;

struct Status(u16);

#[async_trait]
impl Handler<()> for Status {
    type Response = u16;

    async fn handle(&self, _req: ()) -> u16 {
        self.0
    }
}

proptest! {
    #[test]
    fn last_replace_wins(initial in any::<u16>(), statuses in prop::collection::vec(any::<u16>(), 0..32)) {
        let cell = HandlerCell::new(Status(initial));

        for status in &statuses {
            cell.replace(Status(*status));
            // Visible immediately after replace returns
            prop_assert_eq!(tokio_test::block_on(cell.dispatch(())), *status);
        }

        let expected = statuses.last().copied().unwrap_or(initial);
        prop_assert_eq!(cell.current().0, expected);
    }

    #[test]
    fn swap_returns_each_previous_handler(initial in any::<u16>(), statuses in prop::collection::vec(any::<u16>(), 1..32)) {
        let cell = HandlerCell::new(Status(initial));
        let mut expected_previous = initial;

        for status in statuses {
            let previous = cell.swap(Status(status));
            prop_assert_eq!(previous.0, expected_previous);
            expected_previous = status;
        }
    }

    #[test]
    fn snapshots_survive_later_replacements(statuses in prop::collection::vec(any::<u16>(), 1..16)) {
        let cell = HandlerCell::new(Status(statuses[0]));
        let mut snapshots = vec![cell.current()];

        for status in &statuses[1..] {
            cell.replace(Status(*status));
            snapshots.push(cell.current());
        }

        for (snapshot, status) in snapshots.iter().zip(&statuses) {
            prop_assert_eq!(tokio_test::block_on(snapshot.handle(())), *status);
        }
    }

    #[test]
    fn update_applies_every_step(initial in any::<u16>(), deltas in prop::collection::vec(any::<u16>(), 0..32)) {
        let cell = HandlerCell::new(Status(initial));

        for delta in &deltas {
            cell.update(|current| Status(current.0.wrapping_add(*delta)));
        }

        let expected = deltas.iter().fold(initial, |acc, d| acc.wrapping_add(*d));
        prop_assert_eq!(cell.current().0, expected);
    }
}
