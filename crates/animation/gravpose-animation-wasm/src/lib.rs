use js_sys::Float32Array;
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use gravpose_animation_core::{Config, JointId, MotionEngine, Pose, PoseRecord, PoseSource};
use gravpose_bvh::{check_compatibility, parse_bvh, BvhPlayer, JointNameMap};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Plain objects instead of ES `Map`s, so results survive `JSON.stringify`.
fn to_js<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

fn pose_to_js(pose: Option<Pose>) -> Result<JsValue, JsError> {
    match pose {
        Some(p) => to_js(&PoseRecord::from(p), "pose"),
        None => Ok(JsValue::NULL),
    }
}

/// Procedural motion engine for browser hosts.
#[wasm_bindgen]
pub struct GravposeEngine {
    core: MotionEngine,
}

#[wasm_bindgen]
impl GravposeEngine {
    /// Create an engine. Pass a config object, a JSON string or undefined/null for defaults.
    /// Example:
    ///   new GravposeEngine({ gravity: 1.6, walk_duration_ms: 2500 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GravposeEngine, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else if let Some(s) = config.as_string() {
            Config::from_json_str(&s)?
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(GravposeEngine {
            core: MotionEngine::new(cfg),
        })
    }

    /// Set gravity in m/s². Returns the value actually applied.
    #[wasm_bindgen(js_name = setGravity)]
    pub fn set_gravity(&mut self, gravity: f32) -> f32 {
        self.core.set_gravity(gravity)
    }

    /// Switch to a named environment ("moon", "mars", ...). Returns the preset name used.
    #[wasm_bindgen(js_name = setEnvironment)]
    pub fn set_environment(&mut self, name: &str) -> String {
        self.core.set_environment(name).to_string()
    }

    #[wasm_bindgen]
    pub fn gravity(&self) -> f32 {
        self.core.gravity()
    }

    /// Start a clip by name. Returns the resolved duration in ms.
    #[wasm_bindgen(js_name = startClip)]
    pub fn start_clip(
        &mut self,
        name: &str,
        duration_ms: Option<f32>,
        looping: Option<bool>,
    ) -> Result<f32, JsError> {
        Ok(self
            .core
            .start_clip_by_name(name, duration_ms, looping.unwrap_or(false))?)
    }

    /// Stop the running clip. Returns the rest pose, or null if idle.
    #[wasm_bindgen]
    pub fn stop(&mut self) -> Result<JsValue, JsError> {
        pose_to_js(self.core.stop())
    }

    /// Step by `dt_ms` milliseconds. Returns the pose JSON, or null when idle.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f32) -> Result<JsValue, JsError> {
        pose_to_js(self.core.update(dt_ms))
    }

    #[wasm_bindgen(js_name = setWalkingDirection)]
    pub fn set_walking_direction(&mut self, x: f32, y: f32, z: f32) -> bool {
        self.core.set_walking_direction(x, y, z)
    }

    #[wasm_bindgen(js_name = setMovementSpeed)]
    pub fn set_movement_speed(&mut self, walk_speed: f32, run_speed: f32) -> bool {
        self.core.set_movement_speed(walk_speed, run_speed)
    }

    #[wasm_bindgen(js_name = resetPosition)]
    pub fn reset_position(&mut self) {
        self.core.reset_position();
    }

    #[wasm_bindgen(js_name = currentPosition)]
    pub fn current_position(&self) -> Float32Array {
        Float32Array::from(&self.core.current_position()[..])
    }

    #[wasm_bindgen]
    pub fn playback(&self) -> Result<JsValue, JsError> {
        to_js(self.core.playback(), "playback")
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.core.is_playing()
    }

    #[wasm_bindgen(js_name = currentPhase)]
    pub fn current_phase(&self) -> Option<String> {
        self.core.current_phase().map(str::to_string)
    }

    /// Events recorded since the last call, as an array.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<JsValue, JsError> {
        to_js(&self.core.drain_events(), "events")
    }
}

/// BVH clip playback retargeted onto the gravpose joints.
#[wasm_bindgen]
pub struct BvhAnimation {
    player: BvhPlayer,
}

#[wasm_bindgen]
impl BvhAnimation {
    /// Parse BVH text. Mixamo and plain joint names are recognised.
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str) -> Result<BvhAnimation, JsError> {
        console_error_panic_hook::set_once();
        let clip = parse_bvh(text).map_err(|e| JsError::new(&format!("BVH parse error: {e}")))?;
        Ok(BvhAnimation {
            player: BvhPlayer::new(clip, JointNameMap::mixamo()),
        })
    }

    #[wasm_bindgen]
    pub fn play(&mut self) {
        self.player.play();
    }

    #[wasm_bindgen]
    pub fn pause(&mut self) {
        self.player.pause();
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.player.reset();
    }

    #[wasm_bindgen(js_name = setFrame)]
    pub fn set_frame(&mut self, frame: usize) {
        self.player.set_frame(frame);
    }

    #[wasm_bindgen(js_name = setPlaybackSpeed)]
    pub fn set_playback_speed(&mut self, speed: f32) {
        self.player.set_playback_speed(speed);
    }

    /// Step by `dt_ms`. Returns the current frame's pose, or null when paused.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f32) -> Result<JsValue, JsError> {
        pose_to_js(self.player.next_pose(dt_ms))
    }

    /// Pose of the current frame regardless of play state.
    #[wasm_bindgen(js_name = currentPose)]
    pub fn current_pose(&mut self) -> Result<JsValue, JsError> {
        pose_to_js(Some(self.player.current_pose()))
    }

    #[wasm_bindgen(js_name = frameInfo)]
    pub fn frame_info(&self) -> Result<JsValue, JsError> {
        to_js(&self.player.frame_info(), "frame info")
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// Compare against the host model's joints (contract names such as "LEFT_FOREARM").
    /// Undefined/null means the full gravpose humanoid.
    #[wasm_bindgen]
    pub fn compatibility(&self, model_joints: JsValue) -> Result<JsValue, JsError> {
        let joints: Vec<JointId> = if jsvalue_is_undefined_or_null(&model_joints) {
            JointId::ALL.to_vec()
        } else {
            swb::from_value(model_joints)
                .map_err(|e| JsError::new(&format!("model joints error: {e}")))?
        };
        let report = check_compatibility(
            self.player.clip(),
            self.player.retargeter().map(),
            &joints,
        );
        to_js(&report, "compatibility")
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
