use engine::{BattleAction, BattleState, Roster, RosterConfig, RosterError};
use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;
use serde_json::{json, Value};
use std::fmt::Display;

const FFI_VERSION: &str = "monster-battle-ffi 0.1.0";

fn ok(value: Value) -> String {
    json!({ "ok": true, "result": value }).to_string()
}

fn err(status: u16, e: impl Display) -> String {
    json!({ "ok": false, "status": status, "error": e.to_string() }).to_string()
}

fn roster_err(e: RosterError) -> String {
    match e {
        RosterError::NotFound(_) => err(404, "Not found"),
        e @ RosterError::Malformed { .. } => err(422, e),
        RosterError::Io(e) => err(500, e),
    }
}

fn roster_from(config_json: &str) -> Result<Roster, String> {
    RosterConfig::from_json(config_json)
        .map(|cfg| Roster::from_config(&cfg))
        .map_err(|e| err(400, format!("invalid_config: {:#}", e)))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| err(500, e))
}

// Pure entry points; the JNI wrappers below only marshal strings.

pub fn list_monsters_json(config_json: &str) -> String {
    let roster = match roster_from(config_json) {
        Ok(r) => r,
        Err(e) => return e,
    };
    match roster.list_identifiers() {
        Ok(names) => ok(json!({ "names": names })),
        Err(e) => roster_err(e),
    }
}

pub fn resolve_monster_json(config_json: &str, name: &str) -> String {
    let roster = match roster_from(config_json) {
        Ok(r) => r,
        Err(e) => return e,
    };
    match roster.resolve(name).map_err(roster_err).and_then(|m| to_value(&m)) {
        Ok(monster) => ok(json!({ "monster": monster })),
        Err(e) => e,
    }
}

/// Resolve both monsters and return a fresh battle state for the host to keep.
pub fn start_battle_json(config_json: &str, first: &str, second: &str) -> String {
    let roster = match roster_from(config_json) {
        Ok(r) => r,
        Err(e) => return e,
    };
    let result = roster
        .resolve_pair(first, second)
        .map_err(roster_err)
        .and_then(|(one, two)| to_value(&BattleState::new(one, two)));
    match result {
        Ok(state) => ok(state),
        Err(e) => e,
    }
}

/// Apply one action to a state previously returned by this library. States
/// that fail [`BattleState::validate`] are rejected with status 400.
pub fn apply_battle_action_json(state_json: &str, action_json: &str) -> String {
    let mut state: BattleState = match serde_json::from_str(state_json) {
        Ok(s) => s,
        Err(e) => return err(400, format!("invalid_state: {}", e)),
    };
    let action: BattleAction = match serde_json::from_str(action_json) {
        Ok(a) => a,
        Err(e) => return err(400, format!("invalid_action: {}", e)),
    };
    let changed = state.apply(action);
    match to_value(&state) {
        Ok(state) => ok(json!({ "changed": changed, "state": state })),
        Err(e) => e,
    }
}

fn into_jstring(env: &JNIEnv, payload: String) -> jstring {
    match env.new_string(payload) {
        Ok(s) => s.into_raw(),
        // new_string leaves a pending Java exception on failure.
        Err(_) => std::ptr::null_mut(),
    }
}

fn read_arg(env: &mut JNIEnv, value: &JString) -> Result<String, String> {
    env.get_string(value)
        .map(Into::into)
        .map_err(|e| err(400, format!("invalid_argument: {}", e)))
}

#[no_mangle]
pub extern "system" fn Java_com_monsterbattle_Ffi_version(env: JNIEnv, _class: JClass) -> jstring {
    into_jstring(&env, FFI_VERSION.to_string())
}

#[no_mangle]
pub extern "system" fn Java_com_monsterbattle_Ffi_listMonstersJson(
    mut env: JNIEnv,
    _class: JClass,
    config: JString,
) -> jstring {
    let payload = match read_arg(&mut env, &config) {
        Ok(cfg) => list_monsters_json(&cfg),
        Err(e) => e,
    };
    into_jstring(&env, payload)
}

#[no_mangle]
pub extern "system" fn Java_com_monsterbattle_Ffi_resolveMonsterJson(
    mut env: JNIEnv,
    _class: JClass,
    config: JString,
    name: JString,
) -> jstring {
    let payload = match (read_arg(&mut env, &config), read_arg(&mut env, &name)) {
        (Ok(cfg), Ok(name)) => resolve_monster_json(&cfg, &name),
        (Err(e), _) | (_, Err(e)) => e,
    };
    into_jstring(&env, payload)
}

#[no_mangle]
pub extern "system" fn Java_com_monsterbattle_Ffi_startBattleJson(
    mut env: JNIEnv,
    _class: JClass,
    config: JString,
    first: JString,
    second: JString,
) -> jstring {
    let args = (
        read_arg(&mut env, &config),
        read_arg(&mut env, &first),
        read_arg(&mut env, &second),
    );
    let payload = match args {
        (Ok(cfg), Ok(first), Ok(second)) => start_battle_json(&cfg, &first, &second),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => e,
    };
    into_jstring(&env, payload)
}

#[no_mangle]
pub extern "system" fn Java_com_monsterbattle_Ffi_applyBattleActionJson(
    mut env: JNIEnv,
    _class: JClass,
    state: JString,
    action: JString,
) -> jstring {
    let payload = match (read_arg(&mut env, &state), read_arg(&mut env, &action)) {
        (Ok(state), Ok(action)) => apply_battle_action_json(&state, &action),
        (Err(e), _) | (_, Err(e)) => e,
    };
    into_jstring(&env, payload)
}
