// vim: tw=80
//! Adapter methods may be instrumented with tracing
#![deny(warnings)]

use tracing::instrument;
use understudy::*;

pub trait Launcher {
    fn launch(&self, countdown: u32) -> bool;
}

#[derive(Debug, Default)]
pub struct MockLauncher(Mock);

impl Launcher for MockLauncher {
    #[instrument]
    fn launch(&self, countdown: u32) -> bool {
        self.0.invoke("launch", args![countdown], (countdown,))
    }
}

fn launch<C: IntoMatcher<u32>>(countdown: C) -> MethodSetup<(u32,), bool> {
    MethodSetup::new("launch", matchers![countdown])
}

#[test]
fn instrumented_adapter() {
    let mock = MockLauncher::default();
    mock.0.setup(launch(0).returns(true));
    assert!(mock.launch(0));
    assert!(!mock.launch(10));
    assert!(format!("{:?}", mock).contains("launch(10)"));
}
