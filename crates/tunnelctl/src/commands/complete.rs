//! `complete`: completion host entrypoint.
//!
//! Always succeeds. A missing profile, an unreachable backend or a failed
//! inventory query just means fewer candidates.

use std::io::{self, Write};

use tracing::debug;

use tunnelctl_config::KeySources;
use tunnelctl_core::{CandidatePool, RemoteBackend};

use crate::cli::{CompleteArgs, CompleteTarget, GlobalOpts};
use crate::config;

pub async fn handle(args: CompleteArgs, global: &GlobalOpts) {
    let candidates = match args.target {
        CompleteTarget::InstancePort { buffer, cursor } => {
            let cursor = cursor.unwrap_or(buffer.len());
            instance_port(global, &buffer, cursor).await
        }
    };

    let mut stdout = io::stdout().lock();
    for candidate in candidates {
        if writeln!(stdout, "{candidate}").is_err() {
            break;
        }
    }
}

async fn instance_port(global: &GlobalOpts, buffer: &str, cursor: usize) -> Vec<String> {
    let cfg = config::load_config_or_default();
    let known = cfg.defaults.completion_candidates.clone();

    // Runs on every keystroke, so only credential stores that answer at once.
    let backend = config::resolve_backend_with(global, &cfg, KeySources::SkipKeyring)
        .map_err(|e| e.to_string())
        .and_then(|c| RemoteBackend::connect_for_completion(c).map_err(|e| e.to_string()));

    match backend {
        Ok(backend) => {
            backend
                .completer()
                .with_static(known)
                .complete(buffer, cursor)
                .await
        }
        Err(reason) => {
            debug!(%reason, "no backend for completion, using static candidates");
            CandidatePool::new(known).complete(buffer, cursor)
        }
    }
}
