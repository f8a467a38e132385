// Shared interaction tuning constants. Durations are in seconds unless the
// name says otherwise; wall-clock windows are in milliseconds.

// Restore-to-rest transition used by every exit animation
pub const RESTORE_SECS: f32 = 0.3;

// Piano key press: down then back up
pub const KEY_PRESS_DOWN_SECS: f32 = 0.1;
pub const KEY_PRESS_UP_SECS: f32 = 0.1;
pub const KEY_PRESS_DEPTH: f32 = 0.05; // world units the key travels down

// Scale pops
pub const JUMP_SECS: f32 = 0.35;
pub const DEFAULT_JUMP_FACTOR: f32 = 1.4;
pub const INFO_SECS: f32 = 0.5;
pub const INFO_SCALE_FACTOR: f32 = 1.25;
pub const INFO_TILT_RAD: f32 = 0.12; // about the z axis
pub const POP_SECS: f32 = 0.3;
pub const POP_SCALE_FACTOR: f32 = 1.1;

// Spin-and-lift rides
pub const RIDE_SPIN_SECS: f32 = 1.5;
pub const RIDE_TURNS: f32 = 1.0;
pub const RIDE_LIFT: f32 = 0.3;
pub const RIDE_COOLDOWN_SECS: f32 = 0.5;
pub const GUITAR_TURNS: f32 = 2.0;
pub const GUITAR_LIFT: f32 = 0.6;

// Vinyl shelf slide
pub const VINYL_SLIDE_OUT_SECS: f32 = 0.4;
pub const VINYL_SLIDE_BACK_SECS: f32 = 0.4;
pub const VINYL_SLIDE_DISTANCE: f32 = 0.25; // along +x
pub const VINYL_COOLDOWN_SECS: f32 = 0.1;

// Record-to-turntable set piece
pub const BOWIE_LIFT_SECS: f32 = 0.5;
pub const BOWIE_TRAVEL_SECS: f32 = 1.5;
pub const BOWIE_DROP_SECS: f32 = 0.5;
pub const BOWIE_SPIN_SECS: f32 = 5.0;
pub const BOWIE_UNSPIN_SECS: f32 = 0.5;
pub const BOWIE_LIFT: f32 = 0.5;
pub const BOWIE_SPIN_TURNS: f32 = 4.0;
pub const BOWIE_REST_OFFSET: f32 = 0.02; // sits just above the turntable
pub const BOWIE_COOLDOWN_SECS: f32 = 0.5;

// Well-known props of the set piece
pub const BOWIE_PROP_NAME: &str = "Bowie_Vinyl";
pub const RECORD_PROP_NAME: &str = "Record";
pub const PLAYER_PROP_NAME: &str = "Record_Player";

// Modal gate
pub const MODAL_OPEN_SECS: f32 = 0.5;
pub const MODAL_CLOSE_SECS: f32 = 0.3;
pub const MODAL_CLOSE_DEBOUNCE_MS: f64 = 300.0;

// Click/tap filtering
pub const TOUCH_CLICK_SUPPRESS_MS: f64 = 500.0;
pub const DRAG_THRESHOLD_PX: f32 = 6.0;

// Naming conventions
pub const POINTER_NAME_MARKER: &str = "Pointer";
pub const WORK_NAME_MARKER: &str = "My_Work";
pub const ABOUT_NAME_MARKER: &str = "About";
pub const CONTACT_NAME_MARKER: &str = "Contact";

/// Total duration of the record-to-turntable sequence.
#[inline]
pub fn bowie_sequence_secs() -> f32 {
    BOWIE_LIFT_SECS
        + BOWIE_TRAVEL_SECS
        + BOWIE_DROP_SECS
        + BOWIE_SPIN_SECS
        + BOWIE_LIFT_SECS
        + BOWIE_TRAVEL_SECS
        + BOWIE_UNSPIN_SECS
}
