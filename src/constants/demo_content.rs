//! Built-in slide text used when no language model output is available.

/// A canned slide: title, icon name, content lines.
pub struct CannedSlide {
    pub title: &'static str,
    pub icon: &'static str,
    pub lines: &'static [&'static str],
}

pub const AGENDA_TITLE: &str = "Agenda";

pub const FALLBACK_AGENDA: [&str; 6] = [
    "Introduction and Overview",
    "Key Challenges and Opportunities",
    "Strategic Approach and Solutions",
    "Implementation Roadmap",
    "Expected Outcomes and Benefits",
    "Next Steps and Recommendations",
];

pub const CONCLUSION: CannedSlide = CannedSlide {
    title: "Next Steps and Recommendations",
    icon: "check-circle",
    lines: &[
        "Immediate action items and priorities",
        "Resource allocation and budget planning",
        "Stakeholder engagement and communication",
        "Success metrics and monitoring framework",
    ],
};

const INTRODUCTION: CannedSlide = CannedSlide {
    title: "Introduction and Overview",
    icon: "lightbulb",
    lines: &[
        "Current market landscape and trends",
        "Key challenges facing the industry",
        "Opportunities for growth and innovation",
        "Strategic importance of this initiative",
    ],
};

const CHALLENGES: CannedSlide = CannedSlide {
    title: "Key Challenges and Opportunities",
    icon: "target",
    lines: &[
        "Market competition and disruption",
        "Technology adoption barriers",
        "Resource constraints and limitations",
        "Regulatory and compliance requirements",
    ],
};

/// Substituted when free-form text yields no content slides.
pub const FALLBACK_CONTENT: [CannedSlide; 2] = [INTRODUCTION, CHALLENGES];

/// Content slides of the demo deck, in presentation order.
pub const DEMO_CONTENT: [CannedSlide; 5] = [
    INTRODUCTION,
    CHALLENGES,
    CannedSlide {
        title: "Strategic Approach and Solutions",
        icon: "brain",
        lines: &[
            "Comprehensive analysis and planning",
            "Innovative technology solutions",
            "Process optimization and automation",
            "Change management and training",
        ],
    },
    CannedSlide {
        title: "Implementation Roadmap",
        icon: "rocket",
        lines: &[
            "Phase 1: Foundation and Setup (Months 1-3)",
            "Phase 2: Core Development (Months 4-6)",
            "Phase 3: Testing and Refinement (Months 7-9)",
            "Phase 4: Launch and Optimization (Months 10-12)",
        ],
    },
    CannedSlide {
        title: "Expected Outcomes and Benefits",
        icon: "trending-up",
        lines: &[
            "Increased efficiency and productivity",
            "Cost reduction and resource optimization",
            "Enhanced customer satisfaction",
            "Competitive advantage and market position",
        ],
    },
];

/// Outline handed to the design service when no generated outline exists.
pub const DESIGN_DEMO_OUTLINE: [CannedSlide; 6] = [
    CannedSlide {
        title: "Introduction",
        icon: "list",
        lines: &[
            "Welcome and overview",
            "Key objectives for today",
            "What we will cover",
            "Expected outcomes",
        ],
    },
    CannedSlide {
        title: "Current Situation",
        icon: "bar-chart",
        lines: &[
            "Market analysis and trends",
            "Current challenges and opportunities",
            "Competitive landscape",
            "Industry insights",
        ],
    },
    CannedSlide {
        title: "Strategic Approach",
        icon: "lightbulb",
        lines: &[
            "Our methodology and framework",
            "Key strategies and initiatives",
            "Innovation and technology focus",
            "Risk management approach",
        ],
    },
    CannedSlide {
        title: "Implementation Plan",
        icon: "list",
        lines: &[
            "Phase 1: Foundation (Months 1-3)",
            "Phase 2: Development (Months 4-6)",
            "Phase 3: Testing (Months 7-9)",
            "Phase 4: Launch (Months 10-12)",
        ],
    },
    CannedSlide {
        title: "Expected Results",
        icon: "trending-up",
        lines: &[
            "Quantifiable benefits and metrics",
            "Efficiency improvements",
            "Cost savings and ROI",
            "Competitive advantages",
        ],
    },
    CannedSlide {
        title: "Next Steps",
        icon: "check-circle",
        lines: &[
            "Immediate action items",
            "Resource requirements",
            "Timeline and milestones",
            "Success criteria",
        ],
    },
];

/// Design-service outlines never exceed this many slides.
pub const DESIGN_DEMO_MAX_SLIDES: usize = 8;

pub const EMPTY_SLIDE_LINE: &str = "Key points to be discussed";

pub const DESIGN_DEMO_NOTICE_TITLE: &str = "Canva Integration Demo";
pub const DESIGN_DEMO_NOTICE: &str = "This is a demo presentation created with Canva integration.";
