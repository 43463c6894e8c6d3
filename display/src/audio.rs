use std::f32::consts::TAU;

use log::debug;
use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44_100;
const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.5;

/// A sine wave generator fed to SDL's audio thread
pub struct Oscillator {
    phase: f32,
    phase_step: f32,
    volume: f32,
}

impl Oscillator {
    pub fn new(frequency: f32, sample_rate: i32, volume: f32) -> Self {
        Oscillator {
            phase: 0.0,
            phase_step: frequency / sample_rate as f32,
            volume,
        }
    }
}

impl AudioCallback for Oscillator {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = (self.phase * TAU).sin() * self.volume;
            self.phase = (self.phase + self.phase_step) % 1.0;
        }
    }
}

/// # Beeper
/// Plays a steady tone while the sound timer is running.
pub struct Beeper {
    device: AudioDevice<Oscillator>,
    beeping: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio_subsystem = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem.open_playback(None, &desired, |spec| {
            debug!("audio device opened at {} Hz", spec.freq);
            Oscillator::new(TONE_HZ, spec.freq, VOLUME)
        })?;

        Ok(Beeper {
            device,
            beeping: false,
        })
    }

    pub fn start_beep(&mut self) {
        if !self.beeping {
            self.device.resume();
            self.beeping = true;
        }
    }

    pub fn stop_beep(&mut self) {
        if self.beeping {
            self.device.pause();
            self.beeping = false;
        }
    }

    /// Starts or stops the tone to match `active`
    pub fn update(&mut self, active: bool) {
        if active {
            self.start_beep()
        } else {
            self.stop_beep()
        }
    }
}
