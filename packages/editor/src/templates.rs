//! Starter templates offered from the editor toolbar.

/// A named starting point for a post.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub content: &'static str,
}

pub const TEMPLATES: &[Template] = &[
    Template {
        id: "how-to",
        title: "How-To Guide",
        description: "Step-by-step tutorial format",
        content: "<h1>How to [Your Topic Here]</h1>\n\
<p>In this guide you'll learn everything you need to know about [topic], whether you're just starting out or sharpening your skills.</p>\n\
<h2>What You'll Need</h2>\n\
<ul>\n<li>Required tool or resource 1</li>\n<li>Required tool or resource 2</li>\n<li>Required tool or resource 3</li>\n</ul>\n\
<h2>Step 1: Getting Started</h2>\n<p>First, let's begin with the basics...</p>\n\
<h2>Step 2: [Next Step]</h2>\n<p>Now that you've completed step 1, we'll move on to...</p>\n\
<h2>Step 3: [Final Step]</h2>\n<p>Finally, we'll wrap up by...</p>\n\
<h2>Conclusion</h2>\n<p>You've learned how to [topic]. With practice you'll get faster and more confident.</p>",
    },
    Template {
        id: "listicle",
        title: "Listicle",
        description: "Numbered or bulleted list article",
        content: "<h1>10 Essential [Tips] for [Your Topic]</h1>\n\
<p>Discover the [tips] that will help you [achieve goal]. Each one was picked for effectiveness and practicality.</p>\n\
<h2>1. [First Item]</h2>\n<p>Why this matters and how to put it into practice...</p>\n\
<h2>2. [Second Item]</h2>\n<p>Details and benefits...</p>\n\
<h2>3. [Third Item]</h2>\n<p>Practical advice and examples...</p>\n\
<h2>Conclusion</h2>\n<p>Start with one of these today and build from there.</p>",
    },
    Template {
        id: "review",
        title: "Product Review",
        description: "Detailed product or service review",
        content: "<h1>[Product Name] Review: Is It Worth Your Money?</h1>\n\
<p>After testing [Product Name] for [time period], here's an honest look at everything you should know before buying.</p>\n\
<h2>What Is [Product Name]?</h2>\n<p>A brief overview of the product and its purpose...</p>\n\
<h2>Pros</h2>\n<ul>\n<li>Positive aspect 1</li>\n<li>Positive aspect 2</li>\n</ul>\n\
<h2>Cons</h2>\n<ul>\n<li>Negative aspect 1</li>\n<li>Negative aspect 2</li>\n</ul>\n\
<h2>Final Verdict</h2>\n<p>Overall rating and recommendation...</p>",
    },
    Template {
        id: "opinion",
        title: "Opinion Piece",
        description: "Argue a point of view",
        content: "<h1>Why [Your Position] Matters</h1>\n\
<p>Open with the claim you want readers to walk away with.</p>\n\
<h2>The Case For</h2>\n<p>Your strongest argument, with evidence...</p>\n\
<blockquote>A quote or statistic that backs you up.</blockquote>\n\
<h2>The Other Side</h2>\n<p>Acknowledge the best counterargument and answer it...</p>\n\
<h2>Where We Go From Here</h2>\n<p>Close with a call to action.</p>",
    },
];

pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}
