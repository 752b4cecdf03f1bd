use crate::ManagerError;
use std::future::Future;
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::{signal, time};
use tracing::{info, warn};

#[cfg(windows)]
pub const SERVER_EXECUTABLE: &str = "bedrock_server.exe";
#[cfg(not(windows))]
pub const SERVER_EXECUTABLE: &str = "bedrock_server";

/// How long the server gets to shut down after being asked to before it is
/// killed.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Starts the server from inside its own directory with inherited stdio and
/// waits for it to exit. A Ctrl-C (or SIGTERM on Unix) sent to the manager is
/// passed on to the server as a termination request.
pub async fn run_server(executable: &Path) -> Result<ExitStatus, ManagerError> {
  let executable = dunce::canonicalize(executable).map_err(ManagerError::io(executable))?;
  let working_dir = executable.parent().unwrap_or_else(|| Path::new("."));

  let server = Command::new(&executable)
    .current_dir(working_dir)
    .kill_on_drop(true)
    .spawn()
    .map_err(ManagerError::io(&executable))?;
  info!(pid = server.id(), executable = %executable.display(), "server started");

  let status = supervise(server, shutdown_requested(), SHUTDOWN_GRACE)
    .await
    .map_err(ManagerError::io(&executable))?;

  info!(%status, "server exited");
  Ok(status)
}

async fn shutdown_requested() -> io::Result<()> {
  #[cfg(unix)]
  {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    tokio::select! {
      result = signal::ctrl_c() => result,
      _ = terminate.recv() => Ok(()),
    }
  }
  #[cfg(not(unix))]
  {
    signal::ctrl_c().await
  }
}

/// Waits for `server` to exit. Once `shutdown` resolves the server is asked to
/// stop and killed if it is still running after `grace`.
async fn supervise(
  mut server: Child,
  shutdown: impl Future<Output = io::Result<()>>,
  grace: Duration,
) -> io::Result<ExitStatus> {
  tokio::select! {
    status = server.wait() => status,
    requested = shutdown => match requested {
      Ok(()) => stop(&mut server, grace).await,
      Err(error) => {
        warn!(%error, "cannot listen for shutdown signals");
        server.wait().await
      }
    },
  }
}

async fn stop(server: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
  info!("shutdown requested, asking the server to stop");
  request_termination(server)?;
  match time::timeout(grace, server.wait()).await {
    Ok(status) => status,
    Err(_) => {
      warn!("server did not stop within {grace:?}, killing it");
      server.kill().await?;
      server.wait().await
    }
  }
}

#[cfg(unix)]
fn request_termination(server: &mut Child) -> io::Result<()> {
  // no pid once the child has been reaped
  let Some(pid) = server.id() else {
    return Ok(());
  };
  // SAFETY: kill(2) has no memory-safety preconditions; pid is our unreaped child.
  if unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) } == 0 {
    Ok(())
  } else {
    Err(io::Error::last_os_error())
  }
}

// No graceful termination request exists for console processes here.
#[cfg(not(unix))]
fn request_termination(server: &mut Child) -> io::Result<()> {
  server.start_kill()
}
