//! Host fakes for the board traits

use core::cell::Cell;
use std::rc::Rc;

use m8b_hal::{InputPin, ScratchSlot, ScratchStorage};

use crate::config::RuntimeConfig;
use crate::events::{ImuEvent, Pad, PAD_COUNT};
use crate::persist::BootRecord;
use crate::scene::Scene;
use crate::scheduler::{Board, Runtime, RuntimeContext};
use crate::traits::{
    BacklightOutput, Display, DisplayError, MotionSensor, PulseCounter, SensorError, TouchSensor,
};

/// Display that keeps a copy of the last scene it was given
#[derive(Default)]
pub struct RecordingDisplay {
    scene: Option<Scene>,
    pub roots_set: usize,
    pub hidden: bool,
}

impl RecordingDisplay {
    pub fn last_scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }
}

impl Display for RecordingDisplay {
    fn set_root(&mut self, scene: &Scene) -> Result<(), DisplayError> {
        self.scene = Some(scene.clone());
        self.roots_set += 1;
        Ok(())
    }

    fn set_hidden(&mut self, hidden: bool) -> Result<(), DisplayError> {
        self.hidden = hidden;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeBacklight {
    level: f32,
}

impl FakeBacklight {
    pub fn level(&self) -> f32 {
        self.level
    }
}

impl BacklightOutput for FakeBacklight {
    fn set_brightness(&mut self, level: f32) {
        self.level = level;
    }
}

/// Pads held down by the test
#[derive(Default)]
pub struct FakeTouch {
    touched: [bool; PAD_COUNT],
}

impl FakeTouch {
    pub fn set(&mut self, pad: Pad, touched: bool) {
        self.touched[pad as usize] = touched;
    }
}

impl TouchSensor for FakeTouch {
    fn is_touched(&mut self, pad: Pad) -> bool {
        self.touched[pad as usize]
    }
}

/// IMU lying flat and still
#[derive(Default)]
pub struct FakeImu {
    pub fail: bool,
}

impl MotionSensor for FakeImu {
    fn sample(&mut self) -> Result<ImuEvent, SensorError> {
        if self.fail {
            return Err(SensorError::Timeout);
        }
        Ok(ImuEvent {
            accel: [0.0, 0.0, 1.0],
            gyro: [0.0; 3],
        })
    }
}

#[derive(Default)]
pub struct FakeCounter {
    pub pulses: u32,
}

impl PulseCounter for FakeCounter {
    fn take(&mut self) -> u32 {
        core::mem::take(&mut self.pulses)
    }
}

/// Input line whose level the test can change after handing it over
pub struct FakePin {
    level: Rc<Cell<bool>>,
}

impl FakePin {
    pub fn high() -> Self {
        Self {
            level: Rc::new(Cell::new(true)),
        }
    }

    /// Shared handle to the line level, `true` = high
    pub fn line(&self) -> Rc<Cell<bool>> {
        self.level.clone()
    }
}

impl InputPin for FakePin {
    fn is_high(&self) -> bool {
        self.level.get()
    }
}

/// Scratch registers that start out zeroed
#[derive(Default)]
pub struct MemoryScratch {
    words: [u32; 2],
}

impl ScratchStorage for MemoryScratch {
    fn read(&mut self, slot: ScratchSlot) -> u32 {
        self.words[slot.as_u8() as usize]
    }

    fn write(&mut self, slot: ScratchSlot, value: u32) {
        self.words[slot.as_u8() as usize] = value;
    }
}

pub struct TestBoard;

impl Board for TestBoard {
    type Touch = FakeTouch;
    type Imu = FakeImu;
    type Shake = FakeCounter;
    type Charging = FakePin;
    type Standby = FakePin;
    type Backlight = FakeBacklight;
    type Display = RecordingDisplay;
}

pub fn test_context() -> RuntimeContext<TestBoard> {
    RuntimeContext {
        touch: FakeTouch::default(),
        imu: Some(FakeImu::default()),
        shake: FakeCounter::default(),
        charging: FakePin::high(),
        standby: FakePin::high(),
        backlight: FakeBacklight::default(),
        display: RecordingDisplay::default(),
    }
}

pub fn test_runtime(boot: BootRecord, now_ms: u32) -> Runtime<TestBoard> {
    Runtime::new(test_context(), RuntimeConfig::default(), boot, now_ms)
}
