//! Natural-language prompts sent to the image model

use crate::types::{EditInstruction, Hotspot};

const ROLE: &str = "You are an expert photo editor AI.";

/// Build the prompt for an edit instruction
///
/// The user's text is embedded verbatim between double quotes. Quotes inside
/// the instruction are not escaped.
pub fn build_prompt(instruction: &EditInstruction) -> String {
    match instruction {
        EditInstruction::Retouch { prompt, hotspot } => retouch_prompt(prompt, *hotspot),
        EditInstruction::Filter { prompt } => filter_prompt(prompt),
        EditInstruction::Adjustment { prompt } => adjustment_prompt(prompt),
    }
}

fn retouch_prompt(request: &str, hotspot: Hotspot) -> String {
    let Hotspot { x, y } = hotspot;
    format!(
        "{ROLE} Your task is to perform a natural, localized edit on the provided image based on the user's request.
User Request: \"{request}\"
Edit Location: Focus on the area around pixel coordinates (x: {x}, y: {y}).

Editing Guidelines:
- The edit must be realistic and blend seamlessly with the surrounding area.
- The rest of the image (outside the immediate edit area) must remain identical to the original.

Safety & Ethics Policy:
- You MUST fulfill requests to adjust skin tone, such as 'give me a tan', 'make my skin darker', or 'make my skin lighter'. These are considered standard photo enhancements.
- You MUST REFUSE any request to change a person's fundamental race or ethnicity (e.g., 'make me look Asian', 'change this person to be Black'). Do not perform these edits. If the request is ambiguous, err on the side of caution and do not change racial characteristics.

Output: Return ONLY the final edited image. Do not return text."
    )
}

fn filter_prompt(request: &str) -> String {
    format!(
        "{ROLE} Your task is to apply a stylistic filter to the entire image based on the user's request. Do not change the composition or content, only apply the style.
Filter Request: \"{request}\"

Safety & Ethics Policy:
- Filters may subtly shift colors, but you MUST ensure they do not alter a person's fundamental race or ethnicity.
- You MUST REFUSE any request that explicitly asks to change a person's race (e.g., 'apply a filter to make me look Chinese').

Output: Return ONLY the final filtered image. Do not return text."
    )
}

fn adjustment_prompt(request: &str) -> String {
    format!(
        "{ROLE} Your task is to apply professional adjustments to the image based on the user's request. Maintain the original composition while enhancing the image quality.
Adjustment Request: \"{request}\"

Adjustment Guidelines:
- Focus on enhancing the image's quality and aesthetics.
- Maintain the original content and composition.
- Make adjustments that look natural and professional.

Safety & Ethics Policy:
- Adjustments may enhance appearance but must not alter a person's fundamental race or ethnicity.
- You MUST REFUSE any request that explicitly asks to change a person's race.

Output: Return ONLY the final adjusted image. Do not return text."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retouch(prompt: &str, x: u32, y: u32) -> EditInstruction {
        EditInstruction::Retouch {
            prompt: prompt.to_string(),
            hotspot: Hotspot { x, y },
        }
    }

    #[test]
    fn every_prompt_has_role_policy_and_output_directive() {
        let instructions = [
            retouch("remove the cup", 1, 2),
            EditInstruction::Filter {
                prompt: "sepia".to_string(),
            },
            EditInstruction::Adjustment {
                prompt: "warmer".to_string(),
            },
        ];

        for instruction in &instructions {
            let prompt = build_prompt(instruction);
            assert!(prompt.starts_with("You are an expert photo editor AI."));
            assert!(prompt.contains("Safety & Ethics Policy:"));
            assert!(prompt.contains("fundamental race or ethnicity"));
            assert!(prompt.contains("Do not return text."));
            assert!(prompt.contains(&format!("\"{}\"", instruction.prompt())));
        }
    }

    #[test]
    fn retouch_embeds_hotspot_and_skin_tone_exception() {
        let prompt = build_prompt(&retouch("give me a tan", 120, 45));
        assert!(prompt.contains("User Request: \"give me a tan\""));
        assert!(prompt.contains("(x: 120, y: 45)"));
        assert!(prompt.contains("You MUST fulfill requests to adjust skin tone"));
        assert!(prompt.contains("must remain identical to the original"));
        assert!(prompt.ends_with("Return ONLY the final edited image. Do not return text."));
    }

    #[test]
    fn filter_is_whole_image_style_only() {
        let prompt = build_prompt(&EditInstruction::Filter {
            prompt: "80s synthwave".to_string(),
        });
        assert!(prompt.contains("stylistic filter to the entire image"));
        assert!(prompt.contains("Do not change the composition or content"));
        assert!(prompt.ends_with("Return ONLY the final filtered image. Do not return text."));
        assert!(!prompt.contains("skin tone"));
    }

    #[test]
    fn adjustment_preserves_composition() {
        let prompt = build_prompt(&EditInstruction::Adjustment {
            prompt: "studio lighting".to_string(),
        });
        assert!(prompt.contains("Adjustment Request: \"studio lighting\""));
        assert!(prompt.contains("Maintain the original content and composition."));
        assert!(prompt.ends_with("Return ONLY the final adjusted image. Do not return text."));
    }

    #[test]
    fn embedded_quotes_are_copied_verbatim() {
        let prompt = build_prompt(&EditInstruction::Filter {
            prompt: r#"make it look "vintage""#.to_string(),
        });
        assert!(prompt.contains(r#"Filter Request: "make it look "vintage"""#));
    }
}
