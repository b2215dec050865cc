use std::io;
use std::thread;
use std::time::Duration;

use vr_udp::{Hand, PoseSource, TrackedSample, VrUdpReader, DEFAULT_BIND_ADDR};

fn print_sample(hand: Hand, sample: &TrackedSample) {
    let p = sample.pose.position;
    let q = sample.pose.orientation;
    println!(
        "{}:  pos: x: {: >8.4} y: {: >8.4} z: {: >8.4}  \
         quat: x: {: >8.4} y: {: >8.4} z: {: >8.4} w: {: >8.4}  \
         select: {} menu: {}",
        hand, p.x, p.y, p.z, q.x, q.y, q.z, q.w, sample.buttons.select, sample.buttons.menu,
    );
}

fn main() -> io::Result<()> {
    let reader = VrUdpReader::new(DEFAULT_BIND_ADDR)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    println!("Listening for controller packets on {}", DEFAULT_BIND_ADDR);

    loop {
        if let Ok(data) = reader.get_data() {
            if let Some(sample) = data.hand(Hand::Left) {
                print_sample(Hand::Left, sample);
            }
            if let Some(sample) = data.hand(Hand::Right) {
                print_sample(Hand::Right, sample);
            }
        }

        thread::sleep(Duration::from_millis(10));
    }
}
