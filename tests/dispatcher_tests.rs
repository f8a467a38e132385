mod common;

use common::*;
use glam::Vec3;
use room_core::constants::*;
use room_core::*;
use std::f32::consts::TAU;

fn enter(anim: &mut Animator, reg: &mut ObjectRegistry, name: &str) -> ObjectId {
    let id = id(reg, name);
    anim.apply_hover_state(reg, id, true);
    id
}

#[test]
fn jump_scales_by_object_factor_and_restores() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    let jump = enter(&mut anim, &mut reg, "Jump_Box");
    advance(&mut anim, &mut reg, JUMP_SECS + 0.05);
    assert!(approx(live(&reg, "Jump_Box").scale, Vec3::splat(1.5)));
    assert_eq!(reg.state(jump), AnimState::Idle);

    anim.apply_hover_state(&mut reg, jump, false);
    advance(&mut anim, &mut reg, RESTORE_SECS + 0.05);
    assert!(approx(live(&reg, "Jump_Box").scale, Vec3::ONE));
    assert_eq!(anim.active_sequences(), 0);
}

#[test]
fn info_scales_and_tilts() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    enter(&mut anim, &mut reg, "Frame_Group");
    advance(&mut anim, &mut reg, INFO_SECS + 0.05);
    let t = live(&reg, "Frame_Group");
    assert!(approx(t.scale, Vec3::splat(INFO_SCALE_FACTOR)));
    assert!((t.rotation.z - INFO_TILT_RAD).abs() < 1e-3);
}

#[test]
fn restore_is_idempotent() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    let lamp = id(&reg, "Lamp");
    let rest = reg.get(lamp).unwrap().rest.unwrap();

    // exit with no prior enter
    anim.restore(&mut reg, lamp).unwrap();
    advance(&mut anim, &mut reg, RESTORE_SECS + 0.05);
    assert_eq!(live(&reg, "Lamp"), rest);

    anim.apply_hover_state(&mut reg, lamp, true);
    advance(&mut anim, &mut reg, 0.1);
    anim.restore(&mut reg, lamp).unwrap();
    anim.restore(&mut reg, lamp).unwrap();
    advance(&mut anim, &mut reg, RESTORE_SECS + 0.05);
    assert!(approx(live(&reg, "Lamp").scale, rest.scale));
    assert_eq!(anim.active_sequences(), 0);
}

#[test]
fn restore_brings_color_back() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    let lamp = id(&reg, "Lamp");
    reg.get_mut(lamp).unwrap().color = Some(Vec3::ZERO);
    anim.restore(&mut reg, lamp).unwrap();
    advance(&mut anim, &mut reg, RESTORE_SECS + 0.05);
    assert!(approx(
        reg.get(lamp).unwrap().color.unwrap(),
        Vec3::new(1.0, 0.9, 0.7)
    ));
}

#[test]
fn restore_without_rest_errors() {
    let mut reg = ObjectRegistry::new();
    let id = reg.register(ObjectSpec::new("Loose")).unwrap();
    let mut anim = Animator::new();
    assert_eq!(
        anim.restore(&mut reg, id),
        Err(InteractionError::MissingRest("Loose".into()))
    );
}

#[test]
fn key_press_dips_and_releases() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    let key = enter(&mut anim, &mut reg, "Piano_Key_C");
    assert!(anim.is_busy(&reg, key));

    advance(&mut anim, &mut reg, KEY_PRESS_DOWN_SECS);
    assert!((live(&reg, "Piano_Key_C").position.y + KEY_PRESS_DEPTH).abs() < 1e-3);

    // a second press while busy is dropped
    assert_eq!(
        anim.press_key(&mut reg, key),
        Err(InteractionError::Busy("Piano_Key_C".into()))
    );
    assert_eq!(anim.active_sequences(), 1);

    advance(&mut anim, &mut reg, KEY_PRESS_UP_SECS + 0.05);
    assert_eq!(reg.state(key), AnimState::Idle);
    assert!(approx(live(&reg, "Piano_Key_C").position, KEY));
}

#[test]
fn exclusive_behaviors_ignore_retrigger() {
    for name in ["Chair_Pointer", "Guitar", "Vinyl_Shelf", "Bowie_Vinyl"] {
        let mut reg = loaded_registry();
        let mut anim = Animator::new();
        let id = enter(&mut anim, &mut reg, name);
        assert_eq!(reg.state(id), AnimState::Animating, "{}", name);
        assert_eq!(anim.active_sequences(), 1, "{}", name);

        advance(&mut anim, &mut reg, 0.2);
        let mid = live(&reg, name);
        anim.apply_hover_state(&mut reg, id, true);
        anim.apply_hover_state(&mut reg, id, true);
        assert_eq!(anim.active_sequences(), 1, "{}", name);
        assert_eq!(live(&reg, name), mid, "{}", name);
    }
}

#[test]
fn exit_during_exclusive_sequence_is_deferred() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    let chair = enter(&mut anim, &mut reg, "Chair_Pointer");
    advance(&mut anim, &mut reg, 0.5);
    anim.apply_hover_state(&mut reg, chair, false);
    assert_eq!(anim.active_sequences(), 1);
    assert_eq!(reg.state(chair), AnimState::Animating);
}

#[test]
fn ride_spins_lifts_and_cools_down() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    let chair = enter(&mut anim, &mut reg, "Chair_Pointer");
    assert!(!reg.in_hover_set(chair));

    advance(&mut anim, &mut reg, RIDE_SPIN_SECS / 2.0);
    let mid = live(&reg, "Chair_Pointer");
    assert!(mid.position.y > CHAIR.y + RIDE_LIFT * 0.9);
    assert!(mid.rotation.y > 0.0 && mid.rotation.y < RIDE_TURNS * TAU);

    advance(&mut anim, &mut reg, RIDE_SPIN_SECS / 2.0 + 0.05);
    let end = live(&reg, "Chair_Pointer");
    assert!(approx(end.position, CHAIR));
    assert!(approx(end.rotation, Vec3::ZERO));
    assert_eq!(reg.state(chair), AnimState::Cooldown);

    // still locked for most of the cooldown
    advance(&mut anim, &mut reg, RIDE_COOLDOWN_SECS - 0.1);
    assert_eq!(reg.state(chair), AnimState::Cooldown);
    assert!(!reg.in_hover_set(chair));
    anim.apply_hover_state(&mut reg, chair, true);
    assert_eq!(anim.active_sequences(), 0);

    advance(&mut anim, &mut reg, 0.15);
    assert_eq!(reg.state(chair), AnimState::Idle);
    assert!(reg.in_hover_set(chair));
}

#[test]
fn guitar_turns_twice_and_lands_where_it_started() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    enter(&mut anim, &mut reg, "Guitar");
    advance(&mut anim, &mut reg, 0.75);
    assert!(live(&reg, "Guitar").position.y > GUITAR.y + GUITAR_LIFT * 0.9);
    advance(&mut anim, &mut reg, 0.8);
    let end = live(&reg, "Guitar");
    assert!(approx(end.position, GUITAR));
    assert!(approx(end.rotation, Vec3::ZERO));
}

#[test]
fn vinyl_slides_out_and_back_with_cooldown() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    let shelf = enter(&mut anim, &mut reg, "Vinyl_Shelf");
    assert!(!reg.in_hover_set(shelf));

    advance(&mut anim, &mut reg, VINYL_SLIDE_OUT_SECS);
    assert!((live(&reg, "Vinyl_Shelf").position.x - VINYL_SLIDE_DISTANCE).abs() < 1e-3);

    advance(&mut anim, &mut reg, VINYL_SLIDE_BACK_SECS + 0.02);
    assert!(approx(live(&reg, "Vinyl_Shelf").position, SHELF));
    assert_eq!(reg.state(shelf), AnimState::Cooldown);
    assert!(!reg.in_hover_set(shelf));

    advance(&mut anim, &mut reg, 0.05);
    assert_eq!(reg.state(shelf), AnimState::Cooldown);

    advance(&mut anim, &mut reg, 0.1);
    assert_eq!(reg.state(shelf), AnimState::Idle);
    assert!(reg.in_hover_set(shelf));
}

#[test]
fn bowie_set_piece_round_trip() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    assert!((bowie_sequence_secs() - 10.0).abs() < 1e-4);

    let bowie = enter(&mut anim, &mut reg, "Bowie_Vinyl");
    let start = live(&reg, "Bowie_Vinyl");
    assert!(anim.set_piece_playing(&reg));
    assert!(!reg.in_hover_set(bowie));

    // seated on the turntable and spinning
    advance(&mut anim, &mut reg, 4.0);
    let seated = live(&reg, "Bowie_Vinyl");
    assert!(approx(seated.position, PLAYER + Vec3::Y * BOWIE_REST_OFFSET));
    assert!(seated.rotation.y > 0.0);

    // travelling home still wound up; the unspin stage unwinds it
    advance(&mut anim, &mut reg, 5.0);
    let homing = live(&reg, "Bowie_Vinyl");
    assert!((homing.rotation.y - BOWIE_SPIN_TURNS * TAU).abs() < 1e-3);

    advance(&mut anim, &mut reg, 0.9);
    assert_eq!(reg.state(bowie), AnimState::Animating);
    assert!(anim.set_piece_playing(&reg));

    advance(&mut anim, &mut reg, 0.2);
    let end = live(&reg, "Bowie_Vinyl");
    assert!(approx(end.position, start.position));
    assert!(approx(end.rotation, start.rotation));
    assert_eq!(reg.state(bowie), AnimState::Cooldown);
    assert!(!anim.set_piece_playing(&reg));

    advance(&mut anim, &mut reg, BOWIE_COOLDOWN_SECS + 0.05);
    assert_eq!(reg.state(bowie), AnimState::Idle);
    assert!(reg.in_hover_set(bowie));
}

#[test]
fn bowie_without_partners_does_nothing() {
    let mut reg = ObjectRegistry::new();
    reg.register(boxed(BOWIE_PROP_NAME, Some("bowie"), BOWIE))
        .unwrap();
    reg.register(boxed(RECORD_PROP_NAME, None, RECORD)).unwrap();
    reg.finish_loading().unwrap();
    let mut anim = Animator::new();
    let bowie = enter(&mut anim, &mut reg, BOWIE_PROP_NAME);
    assert_eq!(
        anim.active_sequences(),
        0,
        "missing turntable must not start the set piece"
    );
    assert_eq!(reg.state(bowie), AnimState::Idle);
    assert!(reg.in_hover_set(bowie));
    assert_eq!(
        HoverKind::Bowie.enter(&mut anim, &mut reg, bowie),
        Err(InteractionError::MissingProp(PLAYER_PROP_NAME))
    );
}

#[test]
fn bowie_tag_on_other_object_does_nothing() {
    let mut reg = ObjectRegistry::new();
    reg.register(boxed("Poster", Some("bowie"), BOWIE)).unwrap();
    reg.register(boxed(RECORD_PROP_NAME, None, RECORD)).unwrap();
    reg.register(boxed(PLAYER_PROP_NAME, None, PLAYER)).unwrap();
    reg.finish_loading().unwrap();
    let mut anim = Animator::new();
    let poster = enter(&mut anim, &mut reg, "Poster");
    assert_eq!(anim.active_sequences(), 0);
    assert_eq!(reg.state(poster), AnimState::Idle);
    assert_eq!(live(&reg, "Poster").position, BOWIE);
}

#[test]
fn set_piece_membership() {
    let reg = loaded_registry();
    let anim = Animator::new();
    for name in ["Bowie_Vinyl", "Record", "Record_Player"] {
        assert!(anim.is_set_piece_member(&reg, id(&reg, name)), "{}", name);
    }
    assert!(!anim.is_set_piece_member(&reg, id(&reg, "Guitar")));
}

#[test]
fn cancel_releases_and_readmits() {
    let mut reg = loaded_registry();
    let mut anim = Animator::new();
    let shelf = enter(&mut anim, &mut reg, "Vinyl_Shelf");
    advance(&mut anim, &mut reg, 0.2);
    assert_eq!(anim.cancel_sequences(&mut reg, shelf), 1);
    assert_eq!(reg.state(shelf), AnimState::Idle);
    assert!(reg.in_hover_set(shelf));
    assert!(!anim.is_animating(shelf));
}
