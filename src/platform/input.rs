//! Start/Pause and quit controls

/// User requests recognized by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start/Pause button
    ToggleRun,
    /// Close the simulation
    Quit,
}

impl Command {
    /// Map a keyboard key name (`KeyboardEvent.key`) to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Command::Quit),
            " " => Some(Command::ToggleRun),
            _ => None,
        }
    }
}

/// Frame-loop control state, owned by the UI side
#[derive(Debug, Clone)]
pub struct SimControl {
    /// Whether the simulation step runs each frame
    pub running: bool,
    /// True until the first Start; particles are hidden while set up
    pub setting_up: bool,
    /// Frame loop should terminate
    pub quit: bool,
}

impl Default for SimControl {
    fn default() -> Self {
        Self {
            running: false,
            setting_up: true,
            quit: false,
        }
    }
}

impl SimControl {
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleRun => self.toggle(),
            Command::Quit => {
                self.quit = true;
                self.running = false;
                log::info!("Quit requested");
            }
        }
    }

    /// Flip between running and paused
    pub fn toggle(&mut self) {
        if self.quit {
            return;
        }
        self.running = !self.running;
        self.setting_up = false;
        log::info!("Simulation {}", if self.running { "started" } else { "paused" });
    }

    /// Label for the Start/Pause button
    pub fn button_label(&self) -> &'static str {
        if self.running { "Pause" } else { "Start" }
    }

    pub fn should_step(&self) -> bool {
        self.running && !self.quit
    }

    pub fn should_draw_particles(&self) -> bool {
        !self.setting_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let control = SimControl::default();
        assert!(!control.should_step());
        assert!(!control.should_draw_particles());
        assert_eq!(control.button_label(), "Start");
    }

    #[test]
    fn test_toggle() {
        let mut control = SimControl::default();
        control.apply(Command::ToggleRun);
        assert!(control.should_step());
        assert!(control.should_draw_particles());
        assert_eq!(control.button_label(), "Pause");

        control.apply(Command::ToggleRun);
        assert!(!control.should_step());
        // Particles stay visible once the run has started
        assert!(control.should_draw_particles());
        assert_eq!(control.button_label(), "Start");
    }

    #[test]
    fn test_quit_stops_stepping() {
        let mut control = SimControl::default();
        control.apply(Command::ToggleRun);
        control.apply(Command::Quit);
        assert!(control.quit);
        assert!(!control.should_step());

        control.apply(Command::ToggleRun);
        assert!(!control.should_step());
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key("Escape"), Some(Command::Quit));
        assert_eq!(Command::from_key(" "), Some(Command::ToggleRun));
        assert_eq!(Command::from_key("a"), None);
    }
}
