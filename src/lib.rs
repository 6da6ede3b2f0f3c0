//! Rust implementation of closed-form inverse kinematics for rotary-actuator
//! (servo horn) 6-6 Stewart/Gough platforms.
//!
//! The moving platform hangs on six identical legs, each driven by a servo
//! whose horn rotates in a fixed motor plane and connects to the platform
//! through a rigid rod. Given a requested platform pose (Cartesian
//! translation plus rotation quaternion), the solver returns the horn angle
//! of every servo in closed form, with an independent reachability verdict
//! per leg.
//!
//! # Features
//!
//! - Joint geometry (base anchors, platform anchors, motor plane
//!   orientations) is derived once from seven scalar mechanism parameters.
//! - Poses outside a leg's reach never fail the whole request: the leg is
//!   reported unreachable and the remaining five are still solved.
//! - Geometrically impossible mechanisms are rejected when the solver is
//!   built, not discovered later as NaN angles.
//! - The full linkage (platform joints, horn tips, leg lengths) can be read
//!   back after every solve, so a renderer can draw partial geometry even
//!   for unreachable poses.
//! - A conservative per-axis workspace box bounds the input ranges a control
//!   surface should offer.
//!
//! # Parameters
//!
//! The mechanism is described by seven scalars: base radius, platform
//! radius, rod length, horn length, shaft distance, anchor distance and an
//! advisory rotation limit. Fill out a `stewart_kinematics::Parameters`
//! data structure, or start from `Parameters::simulator_default()`.
//!
//! ## Examples
//!
//! - **basic.rs** (under `demos/`): constructing the default platform,
//!   solving a few poses and printing the workspace envelope.

pub mod parameters;

pub mod parameter_error;

pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod workspace;
