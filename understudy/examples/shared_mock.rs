// vim: tw=80
//! Share one mock between the code under test and several worker threads
//!
//! A `Thermostat` polls a `Sensor` from a pool of threads.  In production the
//! sensor would talk to hardware.  Here it's replaced by a hand-written
//! adapter around `understudy::Mock`, configured with a sequence of readings
//! and checked afterwards.
#![deny(warnings)]

use std::{
    sync::{Arc, Mutex},
    thread
};

use understudy::*;

pub trait Sensor: Send + Sync {
    fn read(&self, channel: u8) -> Result<f32, String>;
}

pub struct Thermostat {
    sensor: Arc<dyn Sensor>
}

impl Thermostat {
    pub fn new(sensor: Arc<dyn Sensor>) -> Self {
        Thermostat{sensor}
    }

    /// Average the readings of `channels`, skipping any that fail.
    pub fn average(&self, channels: &[u8]) -> Option<f32> {
        let handles = channels.iter().map(|&ch| {
            let sensor = self.sensor.clone();
            thread::spawn(move || sensor.read(ch))
        }).collect::<Vec<_>>();
        let readings = handles.into_iter()
            .filter_map(|h| h.join().ok()?.ok())
            .collect::<Vec<_>>();
        if readings.is_empty() {
            None
        } else {
            Some(readings.iter().sum::<f32>() / readings.len() as f32)
        }
    }
}

#[derive(Debug, Default)]
pub struct MockSensor(Mock);

impl Sensor for MockSensor {
    fn read(&self, channel: u8) -> Result<f32, String> {
        self.0.invoke_or_else("read", args![channel], (channel,),
                              || Err("no reading".to_owned()))
    }
}

fn read<C: IntoMatcher<u8>>(channel: C)
    -> MethodSetup<(u8,), Result<f32, String>>
{
    MethodSetup::new("read", matchers![channel])
}

fn main() {
    let sensor = Arc::new(MockSensor::default());
    let polled = Arc::new(Mutex::new(Vec::new()));
    let p = polled.clone();
    sensor.0.setup(read(any()).when(move |(ch,)| {
        p.lock().unwrap().push(ch);
        Ok(20.0 + f32::from(ch))
    }));
    // Channel 3 is broken
    sensor.0.setup(read(3).panics("sensor 3 is on fire"));

    let thermostat = Thermostat::new(sensor.clone());
    let avg = thermostat.average(&[1, 2, 3]);
    println!("average = {:?}", avg);
    assert_eq!(Some(21.5), avg);

    let mut polled = polled.lock().unwrap().clone();
    polled.sort_unstable();
    assert_eq!(vec![1, 2], polled);
    sensor.0.assert_called(read(3).once());
    sensor.0.assert_called(read(any()).times(3));
}
