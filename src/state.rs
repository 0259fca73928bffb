use super::color::*;
use super::paint::*;
use super::transform2d::*;
use super::text::FontId;

/// Maximum depth of the state stack: saving beyond this depth does nothing
pub const MAX_STATES: usize = 32;

///
/// How the ends of open stroked paths are drawn
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum LineCap {
    /// The stroke ends flat at the end point
    Butt,

    /// The stroke ends in a semicircle around the end point
    Round,

    /// The stroke ends flat, half the line width beyond the end point
    Square
}

///
/// How corners in stroked paths are drawn
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel
}

///
/// Winding class of a sub-path: solid shapes and holes are given opposite orientations
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Winding {
    /// Solid shape (positive signed area)
    Solid,

    /// Hole (negative signed area)
    Hole
}

///
/// Sweep direction of an arc
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Sweeps with increasing angle (clockwise in a y-down coordinate system)
    Clockwise,

    /// Sweeps with decreasing angle
    CounterClockwise
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
    Baseline
}

///
/// Text alignment relative to the point passed to the text functions
///
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct TextAlign {
    pub horizontal: HorizontalAlign,
    pub vertical:   VerticalAlign
}

impl Default for TextAlign {
    fn default() -> TextAlign {
        TextAlign { horizontal: HorizontalAlign::Left, vertical: VerticalAlign::Baseline }
    }
}

///
/// A scissor rectangle: a transformed box that rendering is clipped to
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Scissor {
    /// Transform from scissor space (centered on the rectangle) to document space
    pub transform: Transform2D,

    /// Half-size of the rectangle, or None if scissoring is disabled
    pub extent: Option<[f32; 2]>
}

impl Default for Scissor {
    fn default() -> Scissor {
        Scissor {
            transform:  Transform2D([0.0; 6]),
            extent:     None
        }
    }
}

///
/// The attributes used when drawing
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RenderState {
    /// The current transformation matrix
    pub transform: Transform2D,

    pub fill: Paint,
    pub stroke: Paint,

    pub stroke_width: f32,
    pub miter_limit: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,

    /// Alpha multiplier applied to everything that's drawn
    pub alpha: f32,

    pub scissor: Scissor,

    pub font_size: f32,
    pub letter_spacing: f32,
    pub line_height: f32,
    pub font_blur: f32,
    pub text_align: TextAlign,
    pub font_id: Option<FontId>
}

impl Default for RenderState {
    fn default() -> RenderState {
        RenderState {
            transform:      Transform2D::identity(),
            fill:           Paint::color(Color::rgba(1.0, 1.0, 1.0, 1.0)),
            stroke:         Paint::color(Color::rgba(0.0, 0.0, 0.0, 1.0)),
            stroke_width:   1.0,
            miter_limit:    10.0,
            line_cap:       LineCap::Butt,
            line_join:      LineJoin::Miter,
            alpha:          1.0,
            scissor:        Scissor::default(),
            font_size:      16.0,
            letter_spacing: 0.0,
            line_height:    1.0,
            font_blur:      0.0,
            text_align:     TextAlign::default(),
            font_id:        None
        }
    }
}

impl RenderState {
    ///
    /// The scale factor used to convert font sizes into device units
    ///
    pub fn font_scale(&self) -> f32 {
        let scale = self.transform.average_scale();

        // Sizes are quantized to avoid thrashing the glyph atlas with tiny variations
        f32::min(f32::floor(scale * 100.0 + 0.5) / 100.0, 4.0)
    }
}

///
/// A stack of render states. The top of the stack is the current state.
///
/// The stack always holds at least one state: restoring the last state does nothing.
///
#[derive(Clone, Debug)]
pub struct StateStack {
    states: Vec<RenderState>
}

impl Default for StateStack {
    fn default() -> StateStack {
        StateStack::new()
    }
}

impl StateStack {
    ///
    /// Creates a stack containing a single default state
    ///
    pub fn new() -> StateStack {
        let mut stack = StateStack { states: Vec::with_capacity(MAX_STATES) };
        stack.save();
        stack
    }

    ///
    /// Number of states on the stack
    ///
    pub fn depth(&self) -> usize {
        self.states.len()
    }

    ///
    /// Discards every saved state, leaving a single default state
    ///
    pub fn reset_stack(&mut self) {
        self.states.clear();
        self.states.push(RenderState::default());
    }

    ///
    /// Pushes a copy of the current state (or a default state if the stack is empty)
    ///
    /// Returns false if the stack is full, in which case nothing is pushed.
    ///
    pub fn save(&mut self) -> bool {
        if self.states.len() >= MAX_STATES {
            warn!("State stack is full ({} entries): save ignored", MAX_STATES);
            return false;
        }

        let state = self.states.last().copied().unwrap_or_default();
        self.states.push(state);

        true
    }

    ///
    /// Pops the current state, unless it's the only state on the stack
    ///
    pub fn restore(&mut self) {
        if self.states.len() > 1 {
            self.states.pop();
        }
    }

    ///
    /// Resets the current state to the default values without changing the depth of the stack
    ///
    pub fn reset(&mut self) {
        *self.current_mut() = RenderState::default();
    }

    ///
    /// Saves the state, runs a block, then restores the state (even if the block panics)
    ///
    pub fn block<TResult, TFn: FnOnce(&mut StateStack) -> TResult>(&mut self, block: TFn) -> TResult {
        let pushed      = self.save();
        let mut guard   = RestoreGuard { stack: self, pushed: pushed };

        block(&mut *guard.stack)
    }

    ///
    /// The current state
    ///
    pub fn current(&self) -> &RenderState {
        &self.states[self.states.len()-1]
    }

    ///
    /// The current state, for modification
    ///
    pub fn current_mut(&mut self) -> &mut RenderState {
        let last = self.states.len()-1;
        &mut self.states[last]
    }
}

///
/// Restores a state stack when dropped
///
struct RestoreGuard<'a> {
    stack:  &'a mut StateStack,
    pushed: bool
}

impl<'a> Drop for RestoreGuard<'a> {
    fn drop(&mut self) {
        if self.pushed {
            self.stack.restore();
        }
    }
}
