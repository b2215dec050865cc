pub mod packet;

pub use packet::Packet;
pub use teleop_traits::{ButtonState, ControllerData, Hand, PoseSource, TeleopError, TrackedSample};

use log::{debug, warn};
use std::net::UdpSocket;
use std::sync::{mpsc, Arc, RwLock};
use std::thread;
use std::time::Duration;

/// Default address the OpenXR-side publisher sends to.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5006";

#[derive(Debug)]
pub enum ReaderCommand {
    Stop,
}

/// Receives controller packets over UDP on a background thread and exposes
/// the latest state through [`PoseSource`].
pub struct VrUdpReader {
    data: Arc<RwLock<ControllerData>>,
    command_tx: mpsc::Sender<ReaderCommand>,
    running: Arc<RwLock<bool>>,
    data_read: Arc<RwLock<bool>>, // Track if data has been read
}

impl VrUdpReader {
    pub fn new(bind_addr: &str) -> Result<Self, TeleopError> {
        let data = Arc::new(RwLock::new(ControllerData::default()));
        let running = Arc::new(RwLock::new(true));
        let data_read = Arc::new(RwLock::new(true));
        let (command_tx, command_rx) = mpsc::channel();

        let reader = VrUdpReader {
            data: Arc::clone(&data),
            command_tx,
            running: Arc::clone(&running),
            data_read: Arc::clone(&data_read),
        };

        reader.start_reading_thread(bind_addr, command_rx)?;

        Ok(reader)
    }

    fn start_reading_thread(
        &self,
        bind_addr: &str,
        command_rx: mpsc::Receiver<ReaderCommand>,
    ) -> Result<(), TeleopError> {
        let data = Arc::clone(&self.data);
        let running = Arc::clone(&self.running);
        let data_read = Arc::clone(&self.data_read);
        let bind_addr = bind_addr.to_string();

        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            // Bind inside the thread and send the result back so `new` can
            // fail fast on an unusable address.
            let socket = match Self::bind(&bind_addr) {
                Ok(s) => {
                    let _ = tx.send(Ok(()));
                    s
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    return;
                }
            };
            debug!("listening for controller packets on {}", bind_addr);

            let mut buffer = [0u8; 2048];
            while let Ok(guard) = running.read() {
                if !*guard {
                    break;
                }
                drop(guard);

                // Check for any pending commands
                if let Ok(command) = command_rx.try_recv() {
                    match command {
                        ReaderCommand::Stop => {
                            if let Ok(mut guard) = running.write() {
                                *guard = false;
                            }
                            break;
                        }
                    }
                }

                match socket.recv_from(&mut buffer) {
                    Ok((len, _)) => match serde_json::from_slice::<Packet>(&buffer[..len]) {
                        Ok(packet) => {
                            let incoming = packet.into_data();
                            if let Ok(mut guard) = data.write() {
                                // A packet may carry only one hand; keep the
                                // other hand's last sample.
                                if incoming.left.is_some() {
                                    guard.left = incoming.left;
                                }
                                if incoming.right.is_some() {
                                    guard.right = incoming.right;
                                }
                            }
                            if let Ok(mut read) = data_read.write() {
                                *read = false;
                            }
                        }
                        Err(e) => warn!("discarding malformed packet: {}", e),
                    },
                    Err(e)
                        if e.kind() == std::io::ErrorKind::WouldBlock
                            || e.kind() == std::io::ErrorKind::TimedOut => {}
                    Err(e) => warn!("error receiving packet: {}", e),
                }
            }
            debug!("reader thread exiting");
        });

        // Wait for the bind result before returning
        rx.recv()
            .map_err(|_| TeleopError::Device("failed to receive bind result".to_string()))?
    }

    fn bind(bind_addr: &str) -> Result<UdpSocket, TeleopError> {
        let socket = UdpSocket::bind(bind_addr)?;
        // Wake up regularly so stop commands are noticed.
        socket.set_read_timeout(Some(Duration::from_millis(100)))?;
        Ok(socket)
    }
}

impl PoseSource for VrUdpReader {
    fn stop(&self) -> Result<(), TeleopError> {
        self.command_tx.send(ReaderCommand::Stop)?;
        Ok(())
    }

    fn get_data(&self) -> Result<ControllerData, TeleopError> {
        // Check if data has been read
        if let Ok(read) = self.data_read.read() {
            if *read {
                return Err(TeleopError::Read("No new data available".to_string()));
            }
        }

        let result = self
            .data
            .read()
            .map(|data| *data)
            .map_err(|_| TeleopError::Lock("controller data lock poisoned".to_string()));

        // Mark data as read if we successfully got it
        if result.is_ok() {
            if let Ok(mut read) = self.data_read.write() {
                *read = true;
            }
        }

        result
    }
}

impl Drop for VrUdpReader {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
