use crossterm::event::KeyCode;

/// Whole-number field bounded to `min..=max`.
///
/// Digits accumulate in a buffer while editing. The value is committed on
/// every keystroke so the form always holds a usable number.
pub struct NumberInputState {
    pub value: u32,
    pub editing: bool,
    min: u32,
    max: u32,
    buffer: String,
}

impl NumberInputState {
    pub fn new(value: u32, min: u32, max: u32) -> Self {
        Self {
            value: value.clamp(min, max),
            editing: false,
            min,
            max,
            buffer: String::new(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        self.buffer.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.buffer.len() < 6 {
                    self.buffer.push(c);
                }
                self.commit_buffer();
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                self.commit_buffer();
            }
            KeyCode::Right | KeyCode::Char('+') => self.step(1),
            KeyCode::Left | KeyCode::Char('-') => self.step(-1),
            _ => {}
        }
    }

    fn commit_buffer(&mut self) {
        if let Ok(parsed) = self.buffer.parse::<u32>() {
            self.value = parsed.clamp(self.min, self.max);
        }
    }

    fn step(&mut self, delta: i64) {
        self.buffer.clear();
        let stepped = (i64::from(self.value) + delta).clamp(i64::from(self.min), i64::from(self.max));
        self.value = stepped as u32;
    }

    pub fn get_display_string(&self) -> String {
        if self.editing {
            if self.buffer.is_empty() {
                format!("{}|", self.value)
            } else {
                format!("[{}]", self.buffer)
            }
        } else {
            self.value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(input: &mut NumberInputState, text: &str) {
        for c in text.chars() {
            input.handle_input(KeyCode::Char(c));
        }
    }

    #[test]
    fn ignores_keys_when_not_editing() {
        let mut input = NumberInputState::new(6, 1, 60);
        typed(&mut input, "12");
        assert_eq!(input.value, 6);
    }

    #[test]
    fn typed_digits_are_clamped() {
        let mut input = NumberInputState::new(6, 1, 60);
        input.toggle_editing();
        typed(&mut input, "12");
        assert_eq!(input.value, 12);
        typed(&mut input, "0");
        assert_eq!(input.value, 60);

        input.toggle_editing();
        input.toggle_editing();
        typed(&mut input, "0");
        assert_eq!(input.value, 1);
    }

    #[test]
    fn arrows_step_within_bounds() {
        let mut input = NumberInputState::new(1, 1, 3);
        input.toggle_editing();
        input.handle_input(KeyCode::Left);
        assert_eq!(input.value, 1);
        input.handle_input(KeyCode::Right);
        input.handle_input(KeyCode::Right);
        input.handle_input(KeyCode::Right);
        assert_eq!(input.value, 3);
    }
}
