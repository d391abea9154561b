use std::env;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use log::{debug, warn};
use crate::error::LaunchError;

const PROMPT: &str = "Choose your mounchie:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuBackend {
    Rofi,
    Wofi,
}

impl MenuBackend {
    pub fn detect() -> Self {
        Self::from_session_type(env::var("XDG_SESSION_TYPE").ok().as_deref())
    }

    pub fn from_session_type(session: Option<&str>) -> Self {
        match session {
            Some("wayland") => MenuBackend::Wofi,
            _ => MenuBackend::Rofi,
        }
    }

    pub fn program(&self) -> &'static str {
        match self {
            MenuBackend::Rofi => "rofi",
            MenuBackend::Wofi => "wofi",
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            MenuBackend::Rofi => vec![
                "-dmenu".into(),
                "-i".into(),
                "-p".into(),
                PROMPT.into(),
                "-show-icons".into(),
                "-no-custom".into(),
                "-theme".into(),
                "mounch".into(),
            ],
            MenuBackend::Wofi => vec![
                "--dmenu".into(),
                "--insensitive".into(),
                "--allow-images".into(),
                format!("--prompt={}", PROMPT),
            ],
        }
    }

    /// Formats one menu row, embedding the icon the way the backend expects.
    pub fn render(&self, line: &MenuLine) -> String {
        match self {
            MenuBackend::Rofi => {
                let icon = match &line.icon_path {
                    Some(path) => path.to_string_lossy().to_string(),
                    None => line.icon.clone(),
                };
                format!("{}\0icon\x1f{}", line.description, icon)
            }
            MenuBackend::Wofi => match &line.icon_path {
                Some(path) => format!("img:{}:text:{}", path.display(), line.description),
                None => line.description.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLine {
    pub description: String,
    pub icon: String,                 // Name as written in the config
    pub icon_path: Option<PathBuf>,   // Set when an icon file exists locally
}

/// Strips whitespace and any image markup the menu echoed back.
pub fn selection_text(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with("img:") {
        if let Some(pos) = trimmed.find(":text:") {
            return &trimmed[pos + ":text:".len()..];
        }
    }
    trimmed
}

pub trait Picker {
    /// Shows `lines` and returns the chosen description, or `None` if cancelled.
    fn pick(&self, lines: &[MenuLine]) -> Result<Option<String>, LaunchError>;
}

pub struct CommandPicker {
    pub backend: MenuBackend,
    command: Option<(String, Vec<String>)>, // Replaces the backend's program and arguments
}

impl CommandPicker {
    pub fn new(backend: MenuBackend) -> Self {
        Self { backend, command: None }
    }

    /// Runs `program` with `args` instead of the backend's menu, keeping its line format.
    pub fn with_command(backend: MenuBackend, program: &str, args: &[&str]) -> Self {
        Self {
            backend,
            command: Some((program.to_string(), args.iter().map(|a| a.to_string()).collect())),
        }
    }

    fn command_line(&self) -> (String, Vec<String>) {
        match &self.command {
            Some(command) => command.clone(),
            None => (self.backend.program().to_string(), self.backend.args()),
        }
    }
}

impl Picker for CommandPicker {
    fn pick(&self, lines: &[MenuLine]) -> Result<Option<String>, LaunchError> {
        let (program, args) = self.command_line();
        let menu_error = |source: std::io::Error| LaunchError::Menu {
            program: program.clone(),
            source,
        };

        let input = lines
            .iter()
            .map(|line| self.backend.render(line))
            .collect::<Vec<_>>()
            .join("\n");

        debug!("Spawning {} with {} entries", program, lines.len());
        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(menu_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(input.as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(menu_error(e));
                }
                warn!("{} closed its input early", program);
            }
        }

        let output = child.wait_with_output().map_err(menu_error)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let choice = selection_text(&stdout);
        if choice.is_empty() {
            return Ok(None);
        }
        Ok(Some(choice.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(icon_path: Option<&str>) -> MenuLine {
        MenuLine {
            description: "Emacs".into(),
            icon: "emacs27".into(),
            icon_path: icon_path.map(PathBuf::from),
        }
    }

    #[test]
    fn wayland_sessions_use_wofi() {
        assert_eq!(MenuBackend::from_session_type(Some("wayland")), MenuBackend::Wofi);
        assert_eq!(MenuBackend::from_session_type(Some("x11")), MenuBackend::Rofi);
        assert_eq!(MenuBackend::from_session_type(None), MenuBackend::Rofi);
    }

    #[test]
    fn rofi_lines_always_carry_icon() {
        assert_eq!(MenuBackend::Rofi.render(&line(None)), "Emacs\0icon\x1femacs27");
        assert_eq!(
            MenuBackend::Rofi.render(&line(Some("/icons/emacs.png"))),
            "Emacs\0icon\x1f/icons/emacs.png"
        );
    }

    #[test]
    fn wofi_lines_embed_only_existing_icons() {
        assert_eq!(MenuBackend::Wofi.render(&line(None)), "Emacs");
        assert_eq!(
            MenuBackend::Wofi.render(&line(Some("/icons/emacs.png"))),
            "img:/icons/emacs.png:text:Emacs"
        );
    }

    #[test]
    fn rofi_arguments_select_dmenu_mode() {
        let args = MenuBackend::Rofi.args();
        assert_eq!(args[0], "-dmenu");
        assert!(args.contains(&"-no-custom".to_string()));
    }

    #[test]
    fn selection_text_strips_markup() {
        assert_eq!(selection_text("Emacs\n"), "Emacs");
        assert_eq!(selection_text("img:/icons/emacs.png:text:Emacs\n"), "Emacs");
        assert_eq!(selection_text("  \n"), "");
    }

    fn lines(descriptions: &[&str]) -> Vec<MenuLine> {
        descriptions
            .iter()
            .map(|d| MenuLine {
                description: d.to_string(),
                icon: "default".into(),
                icon_path: None,
            })
            .collect()
    }

    fn shell(script: &str) -> CommandPicker {
        CommandPicker::with_command(MenuBackend::Wofi, "sh", &["-c", script])
    }

    #[test]
    fn returns_line_printed_by_menu() {
        let picker = shell("cat >/dev/null; printf 'Emacs\\n'");
        let choice = picker.pick(&lines(&["Emacs", "Suspend"])).unwrap();
        assert_eq!(choice.as_deref(), Some("Emacs"));
    }

    #[test]
    fn menu_receives_rendered_lines_on_stdin() {
        let picker = shell("sed -n 2p");
        let choice = picker.pick(&lines(&["Alpha", "Bravo", "Charlie"])).unwrap();
        assert_eq!(choice.as_deref(), Some("Bravo"));
    }

    #[test]
    fn empty_or_blank_output_is_cancel() {
        let silent = shell("cat >/dev/null");
        assert_eq!(silent.pick(&lines(&["Emacs"])).unwrap(), None);

        let blank = shell("cat >/dev/null; printf '  \\n'");
        assert_eq!(blank.pick(&lines(&["Emacs"])).unwrap(), None);
    }

    #[test]
    fn menu_exiting_without_reading_is_tolerated() {
        let many: Vec<String> = (0..20_000).map(|i| format!("Entry number {}", i)).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let picker = shell("exit 0");
        assert_eq!(picker.pick(&lines(&refs)).unwrap(), None);
    }

    #[test]
    fn invalid_utf8_output_is_decoded_lossily() {
        let picker = shell("cat >/dev/null; printf '\\377Emacs\\n'");
        let choice = picker.pick(&lines(&["Emacs"])).unwrap();
        assert_eq!(choice.as_deref(), Some("\u{FFFD}Emacs"));
    }

    #[test]
    fn missing_menu_program_is_an_error() {
        let picker = CommandPicker::with_command(MenuBackend::Rofi, "/nonexistent/menu", &[]);
        let err = picker.pick(&lines(&["Emacs"])).unwrap_err();
        assert!(matches!(err, LaunchError::Menu { ref program, .. } if program == "/nonexistent/menu"));
    }

    #[test]
    fn default_command_comes_from_backend() {
        let (program, args) = CommandPicker::new(MenuBackend::Wofi).command_line();
        assert_eq!(program, "wofi");
        assert_eq!(args, MenuBackend::Wofi.args());
    }
}
