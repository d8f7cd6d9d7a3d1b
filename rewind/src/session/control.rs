/// Command that produced the latest control change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// No command issued yet.
    #[default]
    None,
    /// A new session was started.
    Start,
    /// Playback resumed.
    Play,
    /// Playback halted.
    Pause,
    /// Primary cursor moved.
    Seek,
    /// Playback speed changed.
    Speed,
    /// Session discarded.
    Stop,
    /// A new stream took over.
    Stream,
}

/// Broadcast on every control change so a publisher can cut its sleep short.
///
/// `generation` changes whenever running streams must end (stop, new start, new
/// stream). `revision` increases on every change. `interrupt` increases on every
/// command that must cut a playing wait short, so a later speed change or repeated
/// `play` cannot hide an earlier pause or seek from a publisher that has not woken
/// yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlSignal {
    /// Stream ownership epoch.
    pub generation: u64,
    /// Monotonic change counter.
    pub revision: u64,
    /// Count of commands that cut a playing wait short.
    pub interrupt: u64,
    /// What the latest change was.
    pub last: Command,
}

impl ControlSignal {
    /// Record a command that leaves running streams in place.
    pub const fn touch(&mut self, command: Command) {
        self.revision += 1;
        if command.interrupts_playback() {
            self.interrupt += 1;
        }
        self.last = command;
    }

    /// Record a command that ends every running stream.
    pub const fn supersede(&mut self, command: Command) {
        self.generation += 1;
        self.touch(command);
    }

}

impl Command {
    /// Returns true when a playing stream should stop waiting and re-tick.
    ///
    /// Speed changes apply from the next wait and a redundant `play` changes nothing.
    #[must_use]
    pub const fn interrupts_playback(self) -> bool {
        matches!(self, Self::Pause | Self::Seek | Self::Start | Self::Stop)
    }
}
