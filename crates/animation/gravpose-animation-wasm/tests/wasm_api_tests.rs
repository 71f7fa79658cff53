#![cfg(target_arch = "wasm32")]
use gravpose_animation_wasm::{abi_version, BvhAnimation, GravposeEngine};
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_json(v: JsValue) -> Value {
    serde_wasm_bindgen::from_value(v).unwrap()
}

fn to_js(v: &Value) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

const STEP: &str = "HIERARCHY
ROOT Hips
{
  OFFSET 0 90 0
  CHANNELS 6 Xposition Yposition Zposition Xrotation Yrotation Zrotation
  JOINT LeftUpLeg
  {
    OFFSET 9 -5 0
    CHANNELS 3 Xrotation Yrotation Zrotation
    End Site
    {
      OFFSET 0 -80 0
    }
  }
}
MOTION
Frames: 2
Frame Time: 0.5
0 90 0 0 0 0 0 0 0
0 90 10 0 0 0 -30 0 0
";

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults_object_and_string() {
    assert!(GravposeEngine::new(JsValue::UNDEFINED).is_ok());
    let eng = GravposeEngine::new(to_js(&json!({ "gravity": 1.6 }))).unwrap();
    assert_eq!(eng.gravity(), 1.6);
    let eng = GravposeEngine::new(JsValue::from_str(r#"{"gravity": 3.7}"#)).unwrap();
    assert_eq!(eng.gravity(), 3.7);
    assert!(GravposeEngine::new(JsValue::from_str("not json")).is_err());
}

#[wasm_bindgen_test]
fn start_update_and_finish() {
    let mut eng = GravposeEngine::new(JsValue::NULL).unwrap();
    assert!(eng.update(16.0).unwrap().is_null());
    assert!(eng.start_clip("nope", None, None).is_err());

    let duration = eng.start_clip("jump", None, None).unwrap();
    assert!(duration > 0.0);
    assert!(eng.is_playing());

    let pose = to_json(eng.update(16.0).unwrap());
    assert!(pose["rotations"]["HIPS"].is_array());
    assert!(pose["translations"]["HIPS"].is_array());

    let mut frames = 0;
    while !eng.update(16.0).unwrap().is_null() {
        frames += 1;
        assert!(frames < 10_000);
    }
    assert!(!eng.is_playing());

    let events = to_json(eng.drain_events().unwrap());
    let names: Vec<String> = events
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e.as_object()?.keys().next().cloned())
        .collect();
    assert_eq!(names.first().map(String::as_str), Some("ClipStarted"));
    assert_eq!(names.last().map(String::as_str), Some("ClipFinished"));
}

#[wasm_bindgen_test]
fn environment_and_locomotion_controls() {
    let mut eng = GravposeEngine::new(JsValue::NULL).unwrap();
    assert_eq!(eng.set_environment("moon"), "moon");
    assert_eq!(eng.gravity(), 1.6);
    assert!(eng.set_walking_direction(1.0, 0.0, 0.0));
    assert!(!eng.set_movement_speed(f32::NAN, 1.0));

    eng.start_clip("walk", Some(1000.0), Some(false)).unwrap();
    while !eng.update(50.0).unwrap().is_null() {}
    assert!(eng.current_position().to_vec()[0] > 0.0);

    eng.reset_position();
    assert_eq!(eng.current_position().to_vec(), vec![0.0, 0.0, 0.0]);
}

#[wasm_bindgen_test]
fn bvh_animation_plays_frames() {
    let mut anim = BvhAnimation::new(STEP).unwrap();
    assert!(anim.update(16.0).unwrap().is_null());

    anim.play();
    let pose = to_json(anim.update(500.0).unwrap());
    let upleg: Vec<f64> = pose["rotations"]["LEFT_UPLEG"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_f64)
        .collect();
    assert_eq!(upleg, vec![30.0, 0.0, 0.0]);

    let info = to_json(anim.frame_info().unwrap());
    assert_eq!(info["current"].as_f64(), Some(1.0));
    assert_eq!(info["total"].as_f64(), Some(2.0));

    let report = to_json(anim.compatibility(JsValue::UNDEFINED).unwrap());
    assert_eq!(report["compatible"], json!(true));
    assert!(BvhAnimation::new("MOTION").is_err());
}
