use crate::view_state::Selection;
use std::fmt::{Display, Formatter};

pub struct PipelineStep {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tools: &'static [&'static str],
}

pub struct TechEntry {
    pub name: &'static str,
    pub category: &'static str,
}

pub static PIPELINE_STEPS: [PipelineStep; 6] = [
    PipelineStep {
        id: "parse",
        name: "Parse Requests",
        description: "Agent processes ride requests from multiple channels (web, SMS, voice)",
        tools: &["CLIP (image understanding)", "Whisper/Coqui (TTS)", "Groq LLM"],
    },
    PipelineStep {
        id: "match",
        name: "Match Riders",
        description: "AI agent groups riders by destination, timing, and location proximity",
        tools: &["CrewAI/TaskWeaver", "Vector embeddings", "LLM reasoning"],
    },
    PipelineStep {
        id: "route",
        name: "Optimize Route",
        description: "Computes optimal pickup sequence and generates route map",
        tools: &[
            "Route optimization algo",
            "Map API",
            "Stable Diffusion/SDXL (map gen)",
        ],
    },
    PipelineStep {
        id: "price",
        name: "Calculate Pricing",
        description: "Distance-based cost calculation with automatic split among riders",
        tools: &["Distance API", "Pricing engine", "Cost allocation"],
    },
    PipelineStep {
        id: "ticket",
        name: "Generate QR Tickets",
        description: "Creates unique QR passes for each rider with pickup details",
        tools: &["QR generator", "Ticket template", "Supabase storage"],
    },
    PipelineStep {
        id: "reminders",
        name: "Schedule Reminders",
        description: "Automatically sends SMS/email reminders before pickup time",
        tools: &["SMS API", "Email service", "Cron scheduler"],
    },
];

pub static TECH_STACK: [TechEntry; 9] = [
    TechEntry { name: "CrewAI / TaskWeaver", category: "Agent Framework" },
    TechEntry { name: "FastAPI", category: "Backend API" },
    TechEntry { name: "Groq", category: "LLM Provider" },
    TechEntry { name: "CLIP", category: "Image Understanding" },
    TechEntry { name: "Stable Diffusion / SDXL", category: "Image Generation" },
    TechEntry { name: "Whisper / Coqui", category: "TTS" },
    TechEntry { name: "Next.js", category: "Frontend" },
    TechEntry { name: "Railway Cron", category: "Scheduler" },
    TechEntry { name: "Supabase", category: "Database & Storage" },
];

pub fn find_step(id: &str) -> Option<&'static PipelineStep> {
    PIPELINE_STEPS.iter().find(|step| step.id == id)
}

pub struct PipelineFormatter<'a> {
    pub open_step: &'a Selection<&'static str>,
}

impl<'a> Display for PipelineFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "How It Works: The Agent Pipeline")?;
        writeln!(
            f,
            "A fully automated system where AI agents orchestrate every step from request parsing to reminder delivery"
        )?;
        writeln!(f)?;

        for (idx, step) in PIPELINE_STEPS.iter().enumerate() {
            let marker = if self.open_step.is_selected(&step.id) { '*' } else { ' ' };
            writeln!(f, "{marker} Step {} [{}] {}", idx + 1, step.id, step.name)?;
            writeln!(f, "    {}", step.description)?;
            if self.open_step.is_selected(&step.id) {
                writeln!(f, "    Tools Used: {}", step.tools.join(", "))?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Tech Stack")?;
        for tech in TECH_STACK.iter() {
            writeln!(f, "  {} ({})", tech.name, tech.category)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_in_pipeline_order() {
        let ids: Vec<&str> = PIPELINE_STEPS.iter().map(|s| s.id).collect();
        assert_eq!(
            vec!["parse", "match", "route", "price", "ticket", "reminders"],
            ids
        );
        assert_eq!("Calculate Pricing", find_step("price").unwrap().name);
        assert!(find_step("dispatch").is_none());
    }

    #[test]
    fn tools_only_for_the_open_step() {
        let mut open_step = Selection::default();
        open_step.toggle("match");
        let text = PipelineFormatter { open_step: &open_step }.to_string();

        assert!(text.contains("Tools Used: CrewAI/TaskWeaver, Vector embeddings, LLM reasoning"));
        assert_eq!(1, text.matches("Tools Used").count());
        assert!(text.contains("* Step 2 [match] Match Riders"));
    }
}
