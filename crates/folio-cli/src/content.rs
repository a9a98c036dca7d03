//! Portfolio page content

/// A showcased project card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub link: &'static str,
}

/// One row of the capabilities ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub title: &'static str,
    pub details: &'static str,
}

/// One entry on the experience ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    pub role: &'static str,
    pub company: &'static str,
    pub date: &'static str,
}

pub const OWNER: &str = "Saad.";
pub const NAV_ITEMS: &[&str] = &["Index", "Capabilities", "Contact"];

pub const HERO_LINES: [&str; 2] = ["SOFTWARE", "ARCHITECT."];
pub const HERO_TAGLINE: &str = "I engineer high-performance web ecosystems, specializing in MERN stack \
architecture, AI automation, and rigorous system design.";
pub const HERO_FACTS: &[&str] = &["Current Rank: 7th Sem BSCS", "Location: Karachi, PK"];

pub const MARQUEE_TEXT: &str = "MERN STACK • AI AUTOMATION • SYSTEM DESIGN • FULL-STACK DEV • ";

pub const PROJECTS: &[Project] = &[
    Project {
        title: "TeamSync",
        description: "Collaborative whiteboard with real-time video meetings, powered by OpenAI & \
Whisper for automated transcriptions.",
        tags: &["React", "Socket.io", "MongoDB", "OpenAI"],
        link: "https://github.com/Saad-007",
    },
    Project {
        title: "ResumeAI",
        description: "An AI-powered resume builder converting user prompts into formatted, \
downloadable PDFs in seconds.",
        tags: &["MERN Stack", "Vite", "OpenAI API"],
        link: "https://github.com/Saad-007",
    },
    Project {
        title: "ShopPlus",
        description: "Full-stack e-commerce architecture with seamless checkout flows and dynamic \
inventory management.",
        tags: &["React", "Node.js", "Express"],
        link: "https://github.com/Saad-007",
    },
];

pub const ARCHIVE_URL: &str = "https://github.com/Saad-007";

pub const CAPABILITIES: &[Capability] = &[
    Capability {
        title: "Frontend Architecture",
        details: "React, Next.js, Tailwind CSS, Framer Motion",
    },
    Capability {
        title: "Backend & DB Systems",
        details: "Node.js, Express, MongoDB, Firebase",
    },
    Capability {
        title: "Artificial Intelligence",
        details: "OpenAI API, Ollama, Whisper Integration",
    },
    Capability {
        title: "Computer Science Core",
        details: "Compiler Construction, System Architecture",
    },
];

pub const EXPERIENCE: &[Experience] = &[
    Experience {
        role: "Web Dev Intern",
        company: "DEN",
        date: "2025",
    },
    Experience {
        role: "Frontend Dev Intern",
        company: "Ziauddin Hospital",
        date: "2025",
    },
];

pub const QUOTE: &str = "\"Bridging academic rigor with industry execution.\"";

pub const CONTACT_HEADING: &str = "INITIATE.";
pub const CONTACT_EMAIL: &str = "saadsafeer223@gmail.com";

pub const FOOTER: &str = "Designed by Saad • © 2026 SS";

/// Chat overlay copy
pub const CHAT_TITLE: &str = "Saad.AI // Terminal";
pub const CHAT_PLACEHOLDER: &str = "QUERY DATABASE...";
pub const BADGE_HEADLINE: &str = "Digital Twin // Online";
pub const BADGE_TAGLINE: &str = "I hold my entire professional memory.";
