//! WAV Trigger command encoder
//!
//! Each operation builds one packet (four for a cross-fade) and hands it to
//! the transport in a single `write_blocking` call, so packets are never
//! interleaved or split. Nothing is read back from the device and no device
//! state is tracked here: what is playing, and at what gain, is known only
//! to the WAV Trigger.
//!
//! # Cross-fade
//!
//! A cross-fade is four independent packets. If a write fails part way the
//! remaining steps are skipped and the error returned; the device may have
//! acted on the steps already sent. Nothing is retried, since re-sending a
//! play or fade would fire it twice.

use wavtrigger_hal::UartTx;
use wavtrigger_protocol::{cross_fade_sequence, Command, TrackAction};

use crate::config::WavTriggerConfig;
use crate::error::Error;

/// WAV Trigger serial command encoder
pub struct WavTrigger<U> {
    uart: U,
    config: WavTriggerConfig,
}

impl<U: UartTx> WavTrigger<U> {
    /// Configure the transport for the configured baud rate and return an
    /// encoder
    ///
    /// Adapters around ports opened elsewhere (`IoUart`, `StdUart`) accept
    /// the settings without applying them.
    pub fn begin(mut uart: U, config: WavTriggerConfig) -> Result<Self, Error<U::Error>> {
        uart.configure(&config.uart_config())
            .map_err(Error::Transport)?;
        debug!("WAV Trigger serial configured for {} baud", config.baudrate);
        Ok(Self::new(uart, config))
    }

    /// Wrap a transport the caller has already opened
    pub fn new(uart: U, config: WavTriggerConfig) -> Self {
        Self { uart, config }
    }

    /// Current configuration
    pub fn config(&self) -> &WavTriggerConfig {
        &self.config
    }

    /// Give the transport back
    pub fn release(self) -> U {
        self.uart
    }

    /// Encode and write a single command
    pub fn send(&mut self, command: &Command) -> Result<(), Error<U::Error>> {
        let packet = command.to_packet();
        trace!("WAV Trigger tx {}", packet);

        if let Err(e) = self.uart.write_blocking(packet.as_bytes()) {
            warn!("WAV Trigger write failed: {}", command.code());
            return Err(Error::Transport(e));
        }
        if self.config.flush_each_packet {
            self.uart.flush().map_err(Error::Transport)?;
        }
        Ok(())
    }

    /// Set the master output gain (0 = full scale, negative = quieter)
    pub fn set_master_gain(&mut self, gain: i16) -> Result<(), Error<U::Error>> {
        self.send(&Command::MasterVolume { gain })
    }

    /// Play a track on its own, stopping all others
    pub fn play_track_solo(&mut self, track: u16) -> Result<(), Error<U::Error>> {
        self.track_control(track, TrackAction::PlaySolo)
    }

    /// Play a track mixed with whatever is already playing
    pub fn play_track_poly(&mut self, track: u16) -> Result<(), Error<U::Error>> {
        self.track_control(track, TrackAction::PlayPoly)
    }

    /// Load a track paused, ready for [`resume_all_in_sync`](Self::resume_all_in_sync)
    pub fn load_track(&mut self, track: u16) -> Result<(), Error<U::Error>> {
        self.track_control(track, TrackAction::Load)
    }

    pub fn stop_track(&mut self, track: u16) -> Result<(), Error<U::Error>> {
        self.track_control(track, TrackAction::Stop)
    }

    pub fn pause_track(&mut self, track: u16) -> Result<(), Error<U::Error>> {
        self.track_control(track, TrackAction::Pause)
    }

    pub fn resume_track(&mut self, track: u16) -> Result<(), Error<U::Error>> {
        self.track_control(track, TrackAction::Resume)
    }

    /// Turn a track's loop flag on or off
    pub fn set_track_loop(&mut self, track: u16, enable: bool) -> Result<(), Error<U::Error>> {
        self.track_control(track, TrackAction::looping(enable))
    }

    /// Send a track control packet with any sub-action
    pub fn track_control(
        &mut self,
        track: u16,
        action: TrackAction,
    ) -> Result<(), Error<U::Error>> {
        self.send(&Command::TrackControl { track, action })
    }

    pub fn stop_all_tracks(&mut self) -> Result<(), Error<U::Error>> {
        self.send(&Command::StopAll)
    }

    /// Resume every paused or loaded track at the same sample position
    pub fn resume_all_in_sync(&mut self) -> Result<(), Error<U::Error>> {
        self.send(&Command::ResumeAllSync)
    }

    /// Set one track's gain immediately
    pub fn set_track_gain(&mut self, track: u16, gain: i16) -> Result<(), Error<U::Error>> {
        self.send(&Command::TrackVolume { track, gain })
    }

    /// Ramp a track to `gain` over `time_ms`
    ///
    /// With `stop_at_end` the device stops the track when the fade completes.
    pub fn fade_track(
        &mut self,
        track: u16,
        gain: i16,
        time_ms: u16,
        stop_at_end: bool,
    ) -> Result<(), Error<U::Error>> {
        self.send(&Command::TrackFade {
            track,
            gain,
            time_ms,
            stop_at_end,
        })
    }

    /// Fade `to` in from silence while `from` fades out and stops
    pub fn cross_fade_track(
        &mut self,
        from: u16,
        to: u16,
        gain: i16,
        time_ms: u16,
    ) -> Result<(), Error<U::Error>> {
        for command in &cross_fade_sequence(from, to, gain, time_ms) {
            self.send(command)?;
        }
        Ok(())
    }

    /// Offset the playback sample rate (pitch bend)
    pub fn set_sample_rate_offset(&mut self, offset: i16) -> Result<(), Error<U::Error>> {
        self.send(&Command::SampleRateOffset { offset })
    }
}
