/// The rendering interface the core issues draw commands to.
///
/// Implemented by the terminal driver (or a test mock); the core never
/// touches the terminal itself. A full render clears the display, emits
/// every buffer line in order with the Visual span underlined, and finally
/// parks the terminal cursor on the active position.
pub trait RenderPort {
    /// Clears the whole display.
    fn clear(&mut self);

    /// Positions the terminal cursor; both coordinates are 1-indexed.
    fn move_cursor(&mut self, line: usize, col: usize);

    /// Emits text at the current position.
    fn write_text(&mut self, s: &str);

    /// Toggles underlining for subsequently written text.
    fn set_underline(&mut self, enabled: bool);

    /// Advances to the start of the next display line.
    fn next_line(&mut self);
}
