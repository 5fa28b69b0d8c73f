// src/prompts.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of site being generated. Selects the system prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Fullstack,
    Ecommerce,
    Saas,
    Portfolio,
    Blog,
}

impl ProjectType {
    /// Parses a project type name. Anything unrecognised is treated as
    /// `Fullstack` rather than rejected.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ecommerce" => ProjectType::Ecommerce,
            "saas" => ProjectType::Saas,
            "portfolio" => ProjectType::Portfolio,
            "blog" => ProjectType::Blog,
            _ => ProjectType::Fullstack,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Fullstack => "fullstack",
            ProjectType::Ecommerce => "ecommerce",
            ProjectType::Saas => "saas",
            ProjectType::Portfolio => "portfolio",
            ProjectType::Blog => "blog",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn system_prompt(project_type: ProjectType) -> &'static str {
    match project_type {
        ProjectType::Fullstack => FULLSTACK_PROMPT,
        ProjectType::Ecommerce => ECOMMERCE_PROMPT,
        ProjectType::Saas => SAAS_PROMPT,
        ProjectType::Portfolio => PORTFOLIO_PROMPT,
        ProjectType::Blog => BLOG_PROMPT,
    }
}

/// Builds the user prompt. `requirements` must already be sanitized.
pub fn user_prompt(requirements: &str, project_type: ProjectType) -> String {
    format!(
        r#"Create a complete {} website with: {}

Generate the entire HTML file with:
- Modern, professional design
- Mobile-responsive layout
- Semantic HTML structure
- Embedded CSS and JavaScript
- Proper form handling if needed
- Clean, maintainable code
- Accessibility considerations

Return ONLY the HTML code without explanations."#,
        project_type, requirements
    )
}

const FULLSTACK_PROMPT: &str = r#"You are an expert full-stack developer. Generate COMPLETE, PRODUCTION-READY code.

REQUIREMENTS:
1. Generate valid HTML, CSS, and JavaScript
2. Include proper error handling
3. Make it mobile-responsive
4. Use modern CSS (Flexbox/Grid)
5. Include security best practices
6. Add basic SEO meta tags
7. Ensure accessibility standards

OUTPUT FORMAT:
Return ONLY the complete HTML file with embedded CSS and JavaScript.
Do not include markdown formatting or explanations."#;

const ECOMMERCE_PROMPT: &str = r#"You are an expert e-commerce developer. Generate COMPLETE online store code.

SPECIFIC REQUIREMENTS:
1. Product listing grid
2. Shopping cart functionality
3. Checkout form with validation
4. Payment integration ready
5. Order confirmation
6. Mobile-first responsive design
7. Security headers and validation

OUTPUT: Complete HTML with all functionality."#;

const SAAS_PROMPT: &str = r#"You are an expert SaaS developer. Generate COMPLETE web application code.

SPECIFIC REQUIREMENTS:
1. User authentication interface
2. Dashboard layout
3. Data tables/cards
4. Settings panel
5. Responsive admin interface
6. Modern component design
7. Professional styling

OUTPUT: Complete HTML with all UI components."#;

const PORTFOLIO_PROMPT: &str = r#"You are an expert web designer. Generate a COMPLETE personal portfolio site.

SPECIFIC REQUIREMENTS:
1. Hero section with name and tagline
2. Project gallery with descriptions
3. About section
4. Skills or services overview
5. Contact form with validation
6. Smooth, responsive layout
7. Accessible color contrast and typography

OUTPUT: Complete HTML with embedded CSS."#;

const BLOG_PROMPT: &str = r#"You are an expert content-site developer. Generate a COMPLETE blog website.

SPECIFIC REQUIREMENTS:
1. Article listing with excerpts
2. Single article layout with readable typography
3. Categories or tags navigation
4. Author bio section
5. Newsletter signup form
6. Responsive layout for reading on mobile
7. SEO meta tags for articles

OUTPUT: Complete HTML with embedded CSS."#;
