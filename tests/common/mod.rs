//! Common test utilities

use santa_draw::draw::{AssignmentSet, DrawRequest, MemberId};
use std::collections::HashSet;
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Route engine logs to the test writer
#[allow(dead_code)]
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .with_ansi(false)
            .try_init();
    });
}

/// Member ids "m0".."m{n-1}"
#[allow(dead_code)]
pub fn members(n: usize) -> Vec<MemberId> {
    (0..n).map(|i| MemberId::new(format!("m{i}"))).collect()
}

/// Assert every success invariant, checked independently of `AssignmentSet::verify`
#[allow(dead_code)]
pub fn assert_valid_draw(request: &DrawRequest, assignments: &AssignmentSet) {
    let members: HashSet<&MemberId> = request.members().iter().collect();
    let givers: Vec<&MemberId> = assignments.iter().map(|a| &a.giver).collect();
    let receivers: Vec<&MemberId> = assignments.iter().map(|a| &a.receiver).collect();

    assert_eq!(assignments.len(), request.members().len());
    assert_eq!(givers.iter().copied().collect::<HashSet<_>>(), members);
    assert_eq!(receivers.iter().copied().collect::<HashSet<_>>(), members);

    let constraints = request.constraints();
    for a in assignments {
        assert_ne!(a.giver, a.receiver, "fixed point at {}", a.giver);
        assert!(
            !constraints.is_excluded(&a.giver, &a.receiver),
            "excluded pair {a}"
        );
        assert!(
            !constraints.history().forbids(&a.giver, &a.receiver),
            "repeated pair {a}"
        );
    }

    assert!(assignments.verify(request).is_ok());
}
