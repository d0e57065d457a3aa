//! Protocol tests for the moisture sensor, pump and heartbeat drivers.

use embedded_hal::digital::PinState;
use irrigator::app::ports::PinPort;
use irrigator::config::RelayPolarity;
use irrigator::drivers::heartbeat::HeartbeatIndicator;
use irrigator::drivers::pump::PumpActuator;
use irrigator::error::{Error, PinOp};
use irrigator::pins::Line;
use irrigator::sensors::moisture::{MoistureSensor, SoilReading};

use crate::mock_hw::{MockBoard, Mode, PinCall};

// ── Moisture sensor ──────────────────────────────────────────

#[test]
fn sample_powers_settles_reads_and_powers_down_in_order() {
    let mut hw = MockBoard::dry();
    let sensor = MoistureSensor::new(2_000, true);

    let reading = sensor.sample(&mut hw).unwrap();

    assert_eq!(reading, SoilReading::Dry);
    assert_eq!(
        hw.calls(),
        [
            PinCall::SetOutput(Line::SensorPower),
            PinCall::SetOutput(Line::SensorGround),
            PinCall::SetLevel(Line::SensorGround, PinState::Low),
            PinCall::SetLevel(Line::SensorPower, PinState::High),
            PinCall::DelayMs(2_000),
            PinCall::SetFloating(Line::SensorData),
            PinCall::Read(Line::SensorData),
            PinCall::SetLevel(Line::SensorPower, PinState::Low),
            PinCall::SetFloating(Line::SensorPower),
            PinCall::SetFloating(Line::SensorGround),
        ]
    );
}

#[test]
fn sample_reads_only_after_settle_delay() {
    let mut hw = MockBoard::new();
    let sensor = MoistureSensor::new(2_000, true);
    sensor.sample(&mut hw).unwrap();

    let powered = hw
        .time_of(PinCall::SetLevel(Line::SensorPower, PinState::High))
        .unwrap();
    let read = hw.time_of(PinCall::Read(Line::SensorData)).unwrap();
    assert!(read - powered >= 2_000);
}

#[test]
fn sample_is_repeatable() {
    let sensor = MoistureSensor::new(2_000, true);
    for high in [false, true] {
        let mut hw = MockBoard::new();
        hw.sensor_high = high;
        let first = sensor.sample(&mut hw).unwrap();
        let second = sensor.sample(&mut hw).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn sample_respects_inverted_probe_wiring() {
    let mut hw = MockBoard::dry();
    let sensor = MoistureSensor::new(10, false);
    assert_eq!(sensor.sample(&mut hw).unwrap(), SoilReading::Wet);
}

#[test]
fn sample_leaves_probe_unpowered_and_floating() {
    let mut hw = MockBoard::new();
    MoistureSensor::new(2_000, true).sample(&mut hw).unwrap();

    assert!(hw.all_floating());
    assert_eq!(hw.level(Line::SensorPower), PinState::Low);
}

#[test]
fn failed_read_still_releases_probe_lines() {
    let mut hw = MockBoard::dry();
    hw.fail = Some((Line::SensorData, PinOp::Read));

    let err = MoistureSensor::new(2_000, true).sample(&mut hw).unwrap_err();

    assert!(matches!(err, Error::Sensor(e) if e.line == Line::SensorData));
    assert_eq!(hw.mode(Line::SensorPower), Mode::Floating);
    assert_eq!(hw.mode(Line::SensorGround), Mode::Floating);
    assert_eq!(hw.level(Line::SensorPower), PinState::Low);
}

#[test]
fn sample_switches_data_line_to_input_before_reading() {
    let mut hw = MockBoard::dry();
    hw.set_output(Line::SensorData).unwrap();
    hw.clear_log();

    let reading = MoistureSensor::new(2_000, true).sample(&mut hw).unwrap();

    assert_eq!(reading, SoilReading::Dry);
    let calls = hw.calls();
    let input = calls
        .iter()
        .position(|c| *c == PinCall::SetFloating(Line::SensorData))
        .unwrap();
    let read = calls
        .iter()
        .position(|c| *c == PinCall::Read(Line::SensorData))
        .unwrap();
    assert!(input < read);
    assert!(hw.all_floating());
}

#[test]
fn data_line_input_failure_skips_read_and_releases() {
    let mut hw = MockBoard::dry();
    hw.fail = Some((Line::SensorData, PinOp::ConfigureInput));

    let err = MoistureSensor::new(2_000, true).sample(&mut hw).unwrap_err();

    assert!(matches!(err, Error::Sensor(e) if e.op == PinOp::ConfigureInput));
    assert_eq!(hw.reads(), 0);
    assert_eq!(hw.mode(Line::SensorPower), Mode::Floating);
    assert_eq!(hw.mode(Line::SensorGround), Mode::Floating);
    assert_eq!(hw.level(Line::SensorPower), PinState::Low);
}

#[test]
fn failed_power_up_skips_settle_and_releases() {
    let mut hw = MockBoard::new();
    hw.fail = Some((Line::SensorGround, PinOp::ConfigureOutput));

    let err = MoistureSensor::new(2_000, true).sample(&mut hw).unwrap_err();

    assert!(matches!(err, Error::Sensor(e) if e.op == PinOp::ConfigureOutput));
    assert_eq!(hw.now_ms(), 0, "no settle wait after a failed power-up");
    assert_eq!(hw.reads(), 0);
    assert!(hw.all_floating());
}

// ── Pump ─────────────────────────────────────────────────────

#[test]
fn pump_runs_for_exactly_the_requested_seconds() {
    let mut hw = MockBoard::new();
    let pump = PumpActuator::new(RelayPolarity::ActiveHigh);

    pump.run(&mut hw, 15).unwrap();

    let on = hw.time_of(PinCall::SetLevel(Line::Relay, PinState::High)).unwrap();
    let off = hw.time_of(PinCall::SetLevel(Line::Relay, PinState::Low)).unwrap();
    assert_eq!(off - on, 15_000);
    assert_eq!(hw.now_ms(), 15_000);
}

#[test]
fn pump_protocol_configures_drives_waits_and_releases() {
    let mut hw = MockBoard::new();
    PumpActuator::new(RelayPolarity::ActiveHigh).run(&mut hw, 3).unwrap();

    assert_eq!(
        hw.calls(),
        [
            PinCall::SetOutput(Line::Relay),
            PinCall::SetLevel(Line::Relay, PinState::High),
            PinCall::DelayMs(3_000),
            PinCall::SetLevel(Line::Relay, PinState::Low),
            PinCall::SetFloating(Line::Relay),
        ]
    );
    assert!(hw.all_floating());
}

#[test]
fn direct_wired_relay_is_active_low() {
    let mut hw = MockBoard::new();
    PumpActuator::new(RelayPolarity::ActiveLow).run(&mut hw, 1).unwrap();

    let calls = hw.calls();
    assert_eq!(calls[1], PinCall::SetLevel(Line::Relay, PinState::Low));
    assert_eq!(calls[3], PinCall::SetLevel(Line::Relay, PinState::High));
    assert_eq!(hw.level(Line::Relay), PinState::High);
}

#[test]
fn failed_relay_write_skips_run_and_releases() {
    let mut hw = MockBoard::new();
    hw.fail = Some((Line::Relay, PinOp::Write));

    let err = PumpActuator::new(RelayPolarity::ActiveHigh)
        .run(&mut hw, 15)
        .unwrap_err();

    assert!(matches!(err, Error::Pump(e) if e.op == PinOp::Write));
    assert_eq!(hw.now_ms(), 0);
    assert_eq!(hw.mode(Line::Relay), Mode::Floating);
}

// ── Heartbeat ────────────────────────────────────────────────

#[test]
fn heartbeat_flashes_then_floats() {
    let mut hw = MockBoard::new();
    HeartbeatIndicator::new().pulse(&mut hw, 30).unwrap();

    assert_eq!(
        hw.calls(),
        [
            PinCall::SetOutput(Line::Heartbeat),
            PinCall::SetLevel(Line::Heartbeat, PinState::High),
            PinCall::DelayMs(30),
            PinCall::SetLevel(Line::Heartbeat, PinState::Low),
            PinCall::SetFloating(Line::Heartbeat),
        ]
    );
    assert!(hw.all_floating());
}

#[test]
fn heartbeat_failure_is_reported_after_release() {
    let mut hw = MockBoard::new();
    hw.fail = Some((Line::Heartbeat, PinOp::ConfigureOutput));

    let err = HeartbeatIndicator::new().pulse(&mut hw, 30).unwrap_err();

    assert!(matches!(err, Error::Heartbeat(_)));
    assert_eq!(hw.count(PinCall::SetFloating(Line::Heartbeat)), 1);
    assert!(hw.all_floating());
}
