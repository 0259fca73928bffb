use super::command::*;
use crate::transform2d::*;

///
/// Records the commands for the current path
///
/// Commands are transformed as they're recorded, so the recorded path does not change if the transform
/// is changed afterwards.
///
#[derive(Clone, Debug, Default)]
pub struct PathRecorder {
    /// The commands for the current path, in document space
    commands: Vec<PathCommand>,

    /// The end point of the last command that had one, before it was transformed
    current_point: Option<(f32, f32)>
}

impl PathRecorder {
    ///
    /// Creates a new empty path recorder
    ///
    pub fn new() -> PathRecorder {
        PathRecorder {
            commands:       Vec::with_capacity(256),
            current_point:  None
        }
    }

    ///
    /// Discards the recorded commands
    ///
    pub fn clear(&mut self) {
        self.commands.clear();
        self.current_point = None;
    }

    ///
    /// Records a command, transforming it into document space
    ///
    pub fn record(&mut self, command: PathCommand, transform: &Transform2D) {
        if let Some(end_point) = command.end_point() {
            self.current_point = Some(end_point);
        }

        self.commands.push(command.transform(transform));
    }

    ///
    /// The recorded commands (in document space)
    ///
    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    ///
    /// True if no commands have been recorded since the path was cleared
    ///
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    ///
    /// The last point that was recorded, in the coordinates it was specified in
    ///
    #[inline]
    pub fn current_point(&self) -> Option<(f32, f32)> {
        self.current_point
    }
}
