/// Drives the fan controller through a scripted event sequence without the
/// interactive loop and prints the resulting group rotations.
use fan3d_core::{FanAssembly, FanConfig, FanController, FanSpeed};

fn main() {
    let config = FanConfig::default();
    let mut fan = FanAssembly::build(&config);
    let mut controller = FanController::new();

    controller.press_power();
    for _ in 0..10 {
        controller.tick(&mut fan);
    }
    report("power on, 10 ticks", &fan);

    controller.select_speed(FanSpeed::High);
    for _ in 0..10 {
        controller.tick(&mut fan);
    }
    report("high speed, 10 more ticks", &fan);

    controller.toggle_oscillation();
    for _ in 0..10 {
        controller.tick(&mut fan);
    }
    report("oscillation off, 10 more ticks", &fan);

    controller.press_power();
    for _ in 0..10 {
        controller.tick(&mut fan);
    }
    report("power off, 10 more ticks (frozen)", &fan);
}

fn report(label: &str, fan: &FanAssembly) {
    println!(
        "{label:38} spin {:8.3} rad, yaw {:7.4} rad",
        fan.wing_spin(),
        fan.head_yaw()
    );
}
