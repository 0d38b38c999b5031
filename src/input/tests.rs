// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use super::*;

#[test]
fn button_from_u7() {
    assert_eq!(ButtonInput::Released, ButtonInput::from_u7(0x00));
    assert_eq!(ButtonInput::Pressed, ButtonInput::from_u7(0x7f));
    // Pads may send their velocity
    assert_eq!(ButtonInput::Pressed, ButtonInput::from_u7(0x01));
}

#[test]
fn button_from_u7_max() {
    assert_eq!(ButtonInput::Pressed, ButtonInput::from_u7_max(0x7f));
    assert_eq!(ButtonInput::Released, ButtonInput::from_u7_max(0x01));
    assert_eq!(ButtonInput::Released, ButtonInput::from_u7_max(0x00));
}

#[test]
fn button_to_u7() {
    assert_eq!(0x7f, ButtonInput::Pressed.to_u7());
    assert_eq!(0x00, ButtonInput::Released.to_u7());
}

#[test]
fn u14_from_u7_halves() {
    assert_eq!(0, u7_be_to_u14(0, 0));
    assert_eq!(0x2000, u7_be_to_u14(64, 0));
    assert_eq!(0x3fff, u7_be_to_u14(127, 127));
    assert_eq!(0x007f, u7_be_to_u14(0, 127));
}

#[test]
fn step_encoder_from_u7_centered() {
    assert_eq!(0, StepEncoderInput::from_u7_centered(64).delta);
    assert_eq!(1, StepEncoderInput::from_u7_centered(65).delta);
    assert_eq!(-1, StepEncoderInput::from_u7_centered(63).delta);
    assert_eq!(-64, StepEncoderInput::from_u7_centered(0).delta);
    assert_eq!(63, StepEncoderInput::from_u7_centered(127).delta);
}

#[test]
#[allow(clippy::float_cmp)]
fn slider_from_u7() {
    assert_eq!(SliderInput::MIN_POSITION, SliderInput::from_u7(0).position);
    assert_eq!(
        SliderInput::MAX_POSITION,
        SliderInput::from_u7(127).position
    );
    assert_eq!(64.0 / 127.0, SliderInput::from_u7(64).position);
}
