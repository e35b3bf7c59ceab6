use crate::ai::options::GenerateOptions;

/// Build the single natural-language instruction sent to a provider. The
/// formatting rules pin down slide shapes the renderer understands
/// (paragraph intro, bullet slides, numbered roadmap), and the model is
/// told to answer with a bare JSON array.
pub fn build_prompt(opts: &GenerateOptions) -> String {
    let mut prompt = format!(
        "Create EXACTLY {count} professional presentation slides about: \"{topic}\"\n\n\
         Language: {language}\n\
         Style: {style}\n\
         Text Length: {length}\n",
        count = opts.slides_count,
        topic = opts.prompt,
        language = opts.language.display_name(),
        style = opts.style.as_str(),
        length = opts.text_amount.instruction(),
    );

    if !opts.outline.is_empty() {
        prompt.push_str("\nUse these slide titles, in this order:\n");
        for (i, line) in opts.outline.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, line));
        }
    }

    prompt.push_str(
        "\nFORMATTING RULES (FOLLOW STRICTLY):\n\
         1. SLIDE 1 (INTRODUCTION): one single paragraph (80-100 words), no bullet points.\n\
         2. SLIDE 2 and SLIDE 7: exactly 2 detailed bullet points each.\n\
         3. SLIDE 5: exactly 4 detailed bullet points.\n\
         4. SLIDE 6 (ROADMAP/PROCESS): 5-6 numbered steps, format \"1. Title: Brief description\".\n\
         5. ALL OTHER SLIDES: 3 to 4 standard bullet points.\n\
         \n\
         Output: JSON array ONLY (no markdown, no explanations)\n\
         \n\
         Format:\n\
         [\n\
           {\"title\": \"Introduction to [Topic]\", \"content\": \"A detailed paragraph...\", \"layout\": \"centered\"},\n\
           {\"title\": \"Deep Dive\", \"content\": \"- Point 1...\\n- Point 2...\", \"layout\": \"split\"},\n\
           {\"title\": \"Process\", \"content\": \"1. Step One: Description\\n2. Step Two: Description\", \"layout\": \"roadmap\"}\n\
         ]\n\
         \n\
         Layouts (cycle through): centered, split, three_col, grid_4, split_box, roadmap\n\
         \n\
         START JSON:\n",
    );

    prompt
}
