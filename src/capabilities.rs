use std::env;
use std::path::Path;

/// Commands that can read text aloud, in order of preference
const SPEECH_COMMANDS: [&str; 4] = ["say", "espeak-ng", "espeak", "spd-say"];

/// Host features resolved once at startup and handed to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub speech: bool,
}

impl Capabilities {
    pub fn probe() -> Self {
        let speech = env::var_os("PATH")
            .map(|paths| {
                env::split_paths(&paths).any(|dir| {
                    SPEECH_COMMANDS
                        .iter()
                        .any(|cmd| is_executable(&dir.join(cmd)))
                })
            })
            .unwrap_or(false);
        log::info!("capability probe: speech={speech}");
        Self { speech }
    }

    /// One-time notice for a voice request the host cannot honour
    pub fn voice_notice(&self, voice_requested: bool) -> Option<&'static str> {
        (voice_requested && !self.speech)
            .then_some("Voice features are unavailable on this system; continuing with text only.")
    }
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.metadata()
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}
