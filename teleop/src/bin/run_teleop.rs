use std::io;
use std::thread;
use std::time::Duration;

use teleop::{
    Calibration, CalibrationConfig, Hand, PoseSource, TeleopSession, VrUdpReader,
    DEFAULT_BIND_ADDR,
};

fn main() -> io::Result<()> {
    let reader = VrUdpReader::new(DEFAULT_BIND_ADDR)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    println!("Listening for controller packets on {}", DEFAULT_BIND_ADDR);

    let calibration = Calibration::from_config(&CalibrationConfig::default());
    let mut session = TeleopSession::new(Hand::Right).with_calibration(calibration);

    loop {
        if let Ok(data) = reader.get_data() {
            match session.update(&data) {
                Ok(Some(delta)) => {
                    let t = delta.translation;
                    let q = delta.orientation;
                    println!(
                        "delta: x: {: >8.4} y: {: >8.4} z: {: >8.4}  \
                         quat: x: {: >8.4} y: {: >8.4} z: {: >8.4} w: {: >8.4}",
                        t.x, t.y, t.z, q.x, q.y, q.z, q.w,
                    );
                }
                Ok(None) => {}
                Err(e) => eprintln!("Error computing increment: {}", e),
            }
        }

        thread::sleep(Duration::from_millis(10));
    }
}
