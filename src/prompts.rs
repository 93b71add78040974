use crate::models::PromptStyle;

pub const INSTAGRAM: &str = include_str!("../data/prompts/instagram.txt");
pub const LINKEDIN: &str = include_str!("../data/prompts/linkedin.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Instruction prompt for a style, with the credit handle filled in.
pub fn instruction_for(style: PromptStyle, handle: &str) -> String {
    let template = match style {
        PromptStyle::Instagram => INSTAGRAM,
        PromptStyle::Linkedin => LINKEDIN,
    };
    render(template, &[("handle", handle)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!INSTAGRAM.is_empty());
        assert!(!LINKEDIN.is_empty());
    }

    #[test]
    fn test_templates_have_handle_placeholder() {
        assert!(INSTAGRAM.contains("{{handle}}"));
        assert!(LINKEDIN.contains("{{handle}}"));
    }

    #[test]
    fn test_instruction_fills_handle() {
        let instruction = instruction_for(PromptStyle::Instagram, "@snapcat");
        assert!(instruction.contains("@snapcat"));
        assert!(!instruction.contains("{{handle}}"));
    }

    #[test]
    fn test_styles_produce_distinct_instructions() {
        let a = instruction_for(PromptStyle::Instagram, "@x");
        let b = instruction_for(PromptStyle::Linkedin, "@x");
        assert_ne!(a, b);
    }
}
