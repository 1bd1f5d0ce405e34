//! Track control sub-actions
//!
//! All per-track transport operations share one packet shape; the
//! sub-action byte selects what the device does with the track.

/// Sub-action carried by a track control packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackAction {
    /// Play the track, stopping everything else
    PlaySolo,
    /// Play the track mixed with whatever is already playing
    PlayPoly,
    /// Pause the track
    Pause,
    /// Resume a paused track
    Resume,
    /// Stop the track
    Stop,
    /// Set the track's loop flag
    LoopOn,
    /// Clear the track's loop flag
    LoopOff,
    /// Load the track paused, ready for a synchronised resume
    Load,
}

// Wire format values
const TRK_PLAY_SOLO: u8 = 0;
const TRK_PLAY_POLY: u8 = 1;
const TRK_PAUSE: u8 = 2;
const TRK_RESUME: u8 = 3;
const TRK_STOP: u8 = 4;
const TRK_LOOP_ON: u8 = 5;
const TRK_LOOP_OFF: u8 = 6;
const TRK_LOAD: u8 = 7;

impl TrackAction {
    /// Parse a sub-action from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TRK_PLAY_SOLO => Some(TrackAction::PlaySolo),
            TRK_PLAY_POLY => Some(TrackAction::PlayPoly),
            TRK_PAUSE => Some(TrackAction::Pause),
            TRK_RESUME => Some(TrackAction::Resume),
            TRK_STOP => Some(TrackAction::Stop),
            TRK_LOOP_ON => Some(TrackAction::LoopOn),
            TRK_LOOP_OFF => Some(TrackAction::LoopOff),
            TRK_LOAD => Some(TrackAction::Load),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            TrackAction::PlaySolo => TRK_PLAY_SOLO,
            TrackAction::PlayPoly => TRK_PLAY_POLY,
            TrackAction::Pause => TRK_PAUSE,
            TrackAction::Resume => TRK_RESUME,
            TrackAction::Stop => TRK_STOP,
            TrackAction::LoopOn => TRK_LOOP_ON,
            TrackAction::LoopOff => TRK_LOOP_OFF,
            TrackAction::Load => TRK_LOAD,
        }
    }

    /// Loop on or off
    pub fn looping(enable: bool) -> Self {
        if enable {
            TrackAction::LoopOn
        } else {
            TrackAction::LoopOff
        }
    }
}
