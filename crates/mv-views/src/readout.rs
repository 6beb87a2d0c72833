/// Live text target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextElement {
    pub text: String,
}

/// Numeric text readout with two decimals
#[derive(Debug, Clone)]
pub struct ValueReadout {
    text: String,
    target: Option<TextElement>,
}

impl ValueReadout {
    pub fn new() -> Self {
        Self {
            text: format_value(0.0),
            target: None,
        }
    }

    pub fn attach(&mut self, target: TextElement) {
        self.target = Some(target);
        self.apply();
    }

    pub fn detach(&mut self) -> Option<TextElement> {
        self.target.take()
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    pub fn set_value(&mut self, value: f64) {
        self.text = format_value(value);
        self.apply();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target(&self) -> Option<&TextElement> {
        self.target.as_ref()
    }

    fn apply(&mut self) {
        if let Some(target) = self.target.as_mut() {
            target.text.clone_from(&self.text);
        }
    }
}

impl Default for ValueReadout {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_uses_two_decimals() {
        let mut readout = ValueReadout::new();
        readout.attach(TextElement::default());
        assert_eq!(readout.target().unwrap().text, "0.00");

        readout.set_value(0.456);
        assert_eq!(readout.text(), "0.46");
        assert_eq!(readout.target().unwrap().text, "0.46");
    }
}
