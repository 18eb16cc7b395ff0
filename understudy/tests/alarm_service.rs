// vim: tw=80
//! Call counts on expectations for a method returning a `Result`
#![deny(warnings)]

use understudy::*;

#[derive(Clone, Debug, PartialEq)]
pub struct AlarmError(&'static str);

pub trait AlarmService {
    fn create_alarm(&self, name: &str) -> Result<(), AlarmError>;
}

#[derive(Default)]
pub struct MockAlarmService(Mock);

impl AlarmService for MockAlarmService {
    fn create_alarm(&self, name: &str) -> Result<(), AlarmError> {
        let name = name.to_owned();
        self.0.invoke_or_else("create_alarm", args![name], (name,),
                              || Ok(()))
    }
}

fn create_alarm<N>(name: N) -> MethodSetup<(String,), Result<(), AlarmError>>
    where N: IntoMatcher<String>
{
    MethodSetup::new("create_alarm", matchers![name])
}

const ERR: AlarmError = AlarmError("Cannot create alarm :(");

fn three_calls(mock: &MockAlarmService) -> Vec<Result<(), AlarmError>> {
    (0..3).map(|_| mock.create_alarm("Fire alarm")).collect()
}

#[test]
fn unlimited_by_default() {
    let mock = MockAlarmService::default();
    mock.0.setup(create_alarm(any()).returns(Err(ERR)));
    assert_eq!(vec![Err(ERR), Err(ERR), Err(ERR)], three_calls(&mock));
}

#[test]
fn times() {
    let mock = MockAlarmService::default();
    mock.0.setup(create_alarm(any()).times(2).returns(Err(ERR)));
    assert_eq!(vec![Err(ERR), Err(ERR), Ok(())], three_calls(&mock));
}

#[test]
fn once() {
    let mock = MockAlarmService::default();
    mock.0.setup(create_alarm(any()).once().returns(Err(ERR)));
    assert_eq!(vec![Err(ERR), Ok(()), Ok(())], three_calls(&mock));
}

#[test]
fn never() {
    let mock = MockAlarmService::default();
    mock.0.setup(create_alarm(any()).never().returns(Err(ERR)));
    assert_eq!(vec![Ok(()), Ok(()), Ok(())], three_calls(&mock));
}

/// An exhausted expectation falls through to the ones set up before it
#[test]
fn exhausted_falls_through() {
    let mock = MockAlarmService::default();
    mock.0.setup(create_alarm(any()).returns(Err(AlarmError("busy"))));
    mock.0.setup(create_alarm("Fire alarm").once().returns(Ok(())));
    assert_eq!(vec![Ok(()), Err(AlarmError("busy")), Err(AlarmError("busy"))],
               three_calls(&mock));
}

#[test]
fn verify_counts() {
    let mock = MockAlarmService::default();
    three_calls(&mock);
    assert!(mock.0.called(create_alarm("Fire alarm").times(3)));
    assert!(!mock.0.called(create_alarm("Fire alarm").times(2)));
    assert!(mock.0.called(create_alarm("Smoke alarm").never()));
}
