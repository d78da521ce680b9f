//! Static informational content: about page, resume tips, quote catalogue.

use serde::Serialize;

pub mod handlers;

#[derive(Debug, Serialize)]
pub struct Feature {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AboutPage {
    pub name: &'static str,
    pub tagline: &'static str,
    pub mission: &'static str,
    pub features: &'static [Feature],
}

#[derive(Debug, Serialize)]
pub struct TipCategory {
    pub category: &'static str,
    pub tips: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct Quote {
    pub id: &'static str,
    pub text: &'static str,
    pub author: &'static str,
}

pub static ABOUT: AboutPage = AboutPage {
    name: "Mitra Guide",
    tagline: "Your AI companion for learning, careers and everyday clarity.",
    mission: "Mitra helps students and young professionals think clearly, learn faster and \
        prepare with confidence, combining timeless wisdom with practical, AI-assisted tools.",
    features: &[
        Feature {
            name: "AatmAI guidance",
            description: "Thoughtful guidance for everyday questions, in English or Hindi.",
        },
        Feature {
            name: "Stories",
            description: "Short original stories with a moral, tuned to the reader's age.",
        },
        Feature {
            name: "Study notes",
            description: "Structured notes on any topic at your level.",
        },
        Feature {
            name: "Project ideas",
            description: "Portfolio-worthy project suggestions matched to your interests.",
        },
        Feature {
            name: "Reports",
            description: "Well-organised academic, business or technical reports.",
        },
        Feature {
            name: "Roadmaps",
            description: "Phased learning plans toward a concrete goal.",
        },
        Feature {
            name: "Mock interviews",
            description: "A three-question practice interview with scored feedback.",
        },
        Feature {
            name: "Mood tracker",
            description: "A private log of how you feel from day to day.",
        },
    ],
};

pub static RESUME_TIPS: &[TipCategory] = &[
    TipCategory {
        category: "Structure",
        tips: &[
            "Keep it to one page until you have several years of experience.",
            "Lead with the section that best proves you fit the role.",
            "Use consistent date formats and clear section headings.",
        ],
    },
    TipCategory {
        category: "Content",
        tips: &[
            "Start every bullet with a strong action verb.",
            "Quantify impact: numbers, percentages, time saved.",
            "Describe your own contribution honestly, especially on team projects.",
            "Tailor keywords to the job description without stuffing them.",
        ],
    },
    TipCategory {
        category: "Polish",
        tips: &[
            "Proofread twice, then ask someone else to read it.",
            "Export to PDF so formatting survives.",
            "Use a professional email address and a descriptive file name.",
        ],
    },
];

pub static QUOTES: &[Quote] = &[
    Quote {
        id: "gita-2-47",
        text: "You have a right to perform your prescribed duties, but you are not entitled \
            to the fruits of your actions.",
        author: "Bhagavad Gita 2.47",
    },
    Quote {
        id: "gita-6-5",
        text: "Elevate yourself through the power of your mind, and not degrade yourself.",
        author: "Bhagavad Gita 6.5",
    },
    Quote {
        id: "kalam-dreams",
        text: "Dream is not that which you see while sleeping; it is something that does not \
            let you sleep.",
        author: "A. P. J. Abdul Kalam",
    },
    Quote {
        id: "vivekananda-arise",
        text: "Arise, awake, and stop not till the goal is reached.",
        author: "Swami Vivekananda",
    },
    Quote {
        id: "gandhi-change",
        text: "Be the change that you wish to see in the world.",
        author: "Mahatma Gandhi",
    },
    Quote {
        id: "tagore-sea",
        text: "You can't cross the sea merely by standing and staring at the water.",
        author: "Rabindranath Tagore",
    },
];

/// Looks up a catalogue quote by id.
pub fn find_quote(id: &str) -> Option<&'static Quote> {
    QUOTES.iter().find(|q| q.id == id)
}
