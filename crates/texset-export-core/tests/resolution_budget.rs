use texset_export_core::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};
use texset_export_core::resolution::{check_resolution, fallback_category};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[test]
fn budgets_per_category() {
    assert_eq!(budget_for(&AssetCategory::Props.into()), Resolution::new(1024, 1024));
    assert_eq!(budget_for(&AssetCategory::Weapons.into()), Resolution::new(2048, 2048));
    assert_eq!(budget_for(&AssetCategory::Characters.into()), Resolution::new(4096, 4096));
}

#[test]
fn unknown_asset_type_falls_back_to_smallest_budget() {
    assert_eq!(fallback_category(), AssetCategory::Props);
    assert_eq!(budget_for(&AssetType::from("Vehicles")), Resolution::new(1024, 1024));
    assert_eq!(budget_for(&AssetType::from("")), Resolution::new(1024, 1024));
}

#[test]
fn ceiling_is_inclusive() {
    let props = AssetType::from(AssetCategory::Props);
    assert!(validate_resolution(&props, Resolution::new(1024, 1024)).passed);
    assert!(!validate_resolution(&props, Resolution::new(1024, 1025)).passed);
    assert!(!validate_resolution(&props, Resolution::new(1025, 1024)).passed);
}

#[test]
fn lower_resolutions_always_pass() {
    for c in AssetCategory::ALL {
        let t = AssetType::from(c);
        for r in [Resolution::new(1, 1), Resolution::new(128, 512), Resolution::new(0, 0)] {
            assert!(validate_resolution(&t, r).passed, "{c} {r}");
        }
        assert!(validate_resolution(&t, c.budget()).passed);
    }
}

#[test]
fn non_square_over_budget_fails_on_either_axis() {
    let weapons = AssetType::from(AssetCategory::Weapons);
    assert!(!validate_resolution(&weapons, Resolution::new(4096, 256)).passed);
    assert!(!validate_resolution(&weapons, Resolution::new(256, 4096)).passed);
    assert!(validate_resolution(&weapons, Resolution::new(2048, 512)).passed);
}

#[test]
fn failure_reason_states_actual_and_budget() {
    let props = AssetType::from(AssetCategory::Props);
    let err = check_resolution(&props, Resolution::new(2048, 2048)).unwrap_err();
    assert_eq!(
        err,
        ResolutionViolation::OverBudget {
            asset_type: props.clone(),
            actual: Resolution::new(2048, 2048),
            budget: Resolution::new(1024, 1024),
        }
    );
    let reason = validate_resolution(&props, Resolution::new(2048, 2048)).reason;
    assert!(reason.contains("2048 x 2048"));
    assert!(reason.contains("1024 x 1024"));
    assert!(reason.contains("Props"));
}

#[test]
fn unknown_asset_type_still_validates_resolution() {
    let vehicles = AssetType::from("Vehicles");
    assert!(validate_resolution(&vehicles, Resolution::new(1024, 1024)).passed);
    let v = validate_resolution(&vehicles, Resolution::new(2048, 1024));
    assert!(!v.passed);
    assert!(v.reason.contains("Vehicles"));
}

/// In-memory log sink for asserting on emitted events.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().expect("lock").clone()).expect("utf8")
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn logs_of<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buf = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .with_max_level(Level::TRACE)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, buf.contents())
}

#[test]
fn fallback_budget_logs_a_warning() {
    let (budget, logs) = logs_of(|| budget_for(&AssetType::from("Vehicles")));
    assert_eq!(budget, Resolution::new(1024, 1024));
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("asset_type=Vehicles"), "{logs}");
    assert!(logs.contains("fallback=1024 x 1024"), "{logs}");
}

#[test]
fn known_categories_do_not_warn() {
    for c in AssetCategory::ALL {
        let (budget, logs) = logs_of(|| budget_for(&c.into()));
        assert_eq!(budget, c.budget());
        assert!(!logs.contains("WARN"), "{c}: {logs}");
    }
}
