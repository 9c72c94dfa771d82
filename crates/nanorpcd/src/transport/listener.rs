//! TCP listener running the accept loop on a background thread.

use std::io;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use nanorpc_config::BindAddress;

use super::{ConnectionHandler, ConnectionStream, LISTENER_TARGET, ListenerError};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(25);
const ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// Listener bound to a TCP address.
#[derive(Debug)]
pub struct SocketListener {
    address: BindAddress,
    local: SocketAddr,
    listener: TcpListener,
}

impl SocketListener {
    /// Resolves `address` and binds the first address it yields.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError`] if resolution or binding fails.
    pub fn bind(address: &BindAddress) -> Result<Self, ListenerError> {
        let listener = bind_tcp(address.host(), address.port())?;
        let local = listener
            .local_addr()
            .map_err(|source| ListenerError::LocalAddr { source })?;
        Ok(Self {
            address: address.clone(),
            local,
            listener,
        })
    }

    /// Address the socket is bound to, with any ephemeral port filled in.
    pub fn local_addr(&self) -> SocketAddr {
        self.local
    }

    /// Starts accepting connections on a background thread.
    ///
    /// Connections are handled one at a time on that thread: the next client
    /// waits in the backlog until the handler returns.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::NonBlocking`] if the socket cannot be
    /// switched to non-blocking mode.
    pub fn start(
        self,
        handler: Arc<dyn ConnectionHandler>,
    ) -> Result<ListenerHandle, ListenerError> {
        self.listener
            .set_nonblocking(true)
            .map_err(|source| ListenerError::NonBlocking { source })?;
        let shutdown = Arc::new(AtomicBool::new(false));
        let active = Arc::new(ActiveConnection::default());
        let flag = Arc::clone(&shutdown);
        let tracked = Arc::clone(&active);
        let local = self.local;
        let handle = thread::spawn(move || {
            run_accept_loop(&self, &flag, &tracked, handler.as_ref());
        });
        Ok(ListenerHandle {
            local,
            shutdown,
            active,
            handle: Some(handle),
        })
    }
}

/// Socket of the connection being served, kept so shutdown can interrupt a
/// session blocked on a silent client.
#[derive(Debug, Default)]
struct ActiveConnection {
    socket: Mutex<Option<TcpStream>>,
}

impl ActiveConnection {
    fn track(&self, socket: TcpStream) {
        *self.slot() = Some(socket);
    }

    fn clear(&self) {
        *self.slot() = None;
    }

    fn interrupt(&self) {
        if let Some(socket) = self.slot().as_ref() {
            if let Err(error) = socket.shutdown(Shutdown::Both) {
                debug!(target: LISTENER_TARGET, error = %error, "interrupting session failed");
            }
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<TcpStream>> {
        self.socket.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to the background listener thread.
///
/// Dropping the handle requests shutdown without waiting for the thread.
#[derive(Debug)]
pub struct ListenerHandle {
    local: SocketAddr,
    shutdown: Arc<AtomicBool>,
    active: Arc<ActiveConnection>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ListenerHandle {
    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local
    }

    /// Asks the accept loop to stop. A connection in progress is shut down
    /// so its session sees end of stream and returns.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.active.interrupt();
    }

    /// Waits for the accept loop to exit.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] if the listener thread
    /// panicked.
    pub fn join(mut self) -> Result<(), ListenerError> {
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(()) => Ok(()),
                Err(_) => Err(ListenerError::ThreadPanic),
            }
        } else {
            Ok(())
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_accept_loop(
    listener: &SocketListener,
    shutdown: &AtomicBool,
    active: &ActiveConnection,
    handler: &dyn ConnectionHandler,
) {
    info!(
        target: LISTENER_TARGET,
        address = %listener.address,
        local = %listener.local,
        "socket listener active"
    );
    let mut last_error = None::<io::ErrorKind>;
    while !shutdown.load(Ordering::SeqCst) {
        match accept_connection(&listener.listener) {
            Ok(Some(stream)) => {
                last_error = None;
                debug!(target: LISTENER_TARGET, peer = %stream.peer(), "connection accepted");
                match stream.try_clone_socket() {
                    Ok(socket) => active.track(socket),
                    Err(error) => warn!(
                        target: LISTENER_TARGET,
                        error = %error,
                        "connection cannot be interrupted on shutdown"
                    ),
                }
                // Shutdown requested between accept and tracking.
                if shutdown.load(Ordering::SeqCst) {
                    active.interrupt();
                }
                handler.handle(stream);
                active.clear();
            }
            Ok(None) => {
                thread::sleep(ACCEPT_BACKOFF);
            }
            Err(error) => {
                let kind = error.kind();
                if last_error != Some(kind) {
                    warn!(
                        target: LISTENER_TARGET,
                        error = %error,
                        "socket accept error"
                    );
                }
                last_error = Some(kind);
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }
    info!(target: LISTENER_TARGET, "socket listener stopped");
}

fn accept_connection(listener: &TcpListener) -> Result<Option<ConnectionStream>, io::Error> {
    match listener.accept() {
        Ok((stream, peer)) => {
            stream.set_nonblocking(false)?;
            Ok(Some(ConnectionStream::new(stream, peer)))
        }
        Err(error) if error.kind() == io::ErrorKind::WouldBlock => Ok(None),
        Err(error) => Err(error),
    }
}

fn bind_tcp(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|source| ListenerError::Resolve {
            host: host.to_owned(),
            port,
            source,
        })?;
    let addr = addrs.next().ok_or_else(|| ListenerError::ResolveEmpty {
        host: host.to_owned(),
        port,
    })?;
    TcpListener::bind(addr).map_err(|source| ListenerError::BindTcp { addr, source })
}
