//! Built-in journaling templates.

use super::{Question, Template};

fn template(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    questions: Vec<Question>,
) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        questions,
    }
}

/// Problem-solving daily report.
pub fn problem_solving() -> Template {
    template(
        "template-problem-solving",
        "Problem Solving Log",
        "Record a problem you hit today, how you solved it, and what you learned.",
        "Problem Solving",
        vec![
            Question::new(
                "q1",
                "What key problem did you run into today?",
                "Describe the situation, e.g. a service outage or a functional defect",
            ),
            Question::new(
                "q2",
                "How did you locate and analyze the problem?",
                "Mention the techniques, data or tools you used",
            ),
            Question::new(
                "q3",
                "How was it finally resolved?",
                "Explain the solution and the key idea behind it",
            ),
            Question::new(
                "q4",
                "What lessons did this teach you?",
                "Your reflection or summary of the problem",
            ),
        ],
    )
}

/// Daily progress report.
pub fn progress_report() -> Template {
    template(
        "template-progress-report",
        "Daily Progress Report",
        "Record what you finished today and what is planned for tomorrow.",
        "Progress",
        vec![
            Question::new(
                "q1",
                "What tasks did you complete today?",
                "List the main work items",
            ),
            Question::new(
                "q2",
                "What difficulties came up along the way?",
                "Unresolved bugs, blockers and so on",
            ),
            Question::new(
                "q3",
                "What is the plan for tomorrow?",
                "List what you expect to get done",
            ),
        ],
    )
}

/// Deep-thinking log.
pub fn thinking_log() -> Template {
    template(
        "template-thinking-log",
        "Deep Thinking Log",
        "Think deeper about something at work that puzzled you or a choice you made.",
        "Reflection",
        vec![
            Question::new(
                "q1",
                "What raised a question or made you curious today?",
                "A user behaviour, a system design choice, ...",
            ),
            Question::new(
                "q2",
                "How did you understand or answer it?",
                "Searching, asking someone, reasoning it through",
            ),
            Question::new(
                "q3",
                "What does it suggest for your work?",
                "How this might shape future decisions",
            ),
        ],
    )
}

/// Weekly: insights from product or technical discussions.
pub fn weekly_discussion_insights() -> Template {
    template(
        "weekly-001-q1",
        "Discussion Insights",
        "Capture ideas from a conversation, talk or review that changed your thinking.",
        "Weekly Review",
        vec![
            Question::new(
                "q1",
                "Which product or technical discussions did you join this week, and what was the core topic?",
                "A design review, an architecture discussion, a PR review",
            ),
            Question::new(
                "q2",
                "Did any conversation or colleague's view change your mind?",
                "Name the person, the viewpoint or the discussion",
            ),
            Question::new(
                "q3",
                "What did you actively raise, clarify or push forward? How was it received?",
                "Communication and influence",
            ),
            Question::new(
                "q4",
                "What did you take away, and did it spark new thinking?",
                "\"I realized the logic behind xxx is ...\"",
            ),
        ],
    )
}

/// Weekly: technical troubleshooting retrospective.
pub fn weekly_troubleshooting() -> Template {
    template(
        "weekly-001-q2",
        "Troubleshooting Retrospective",
        "Review how a technical issue was investigated and the reasoning path taken.",
        "Weekly Review",
        vec![
            Question::new(
                "q1",
                "What technical problem came up this week, and how was it triggered or found?",
                "\"A service returned 500 after scaling out\"",
            ),
            Question::new(
                "q2",
                "How did you start investigating? Which ideas or tools helped?",
                "Reading logs, diffing versions, bisecting",
            ),
            Question::new(
                "q3",
                "Did AI tools help? Which ones, and how well?",
                "What explained the stack trace clearly, what missed",
            ),
            Question::new(
                "q4",
                "Is there a deeper root cause? What is your retrospective?",
                "\"The root cause was an inconsistency in the deploy pipeline\"",
            ),
        ],
    )
}

/// Weekly: AI tool experience.
pub fn weekly_ai_tools() -> Template {
    template(
        "weekly-001-q3",
        "AI Tool Experience",
        "Record trying out AI tools and how they influence the way you work.",
        "Weekly Review",
        vec![
            Question::new(
                "q1",
                "Which new AI tools or features did you try this week, and in what scenario?",
                "Code analysis, autocomplete, log summaries",
            ),
            Question::new(
                "q2",
                "What impressed you most?",
                "It kept following up on a problem more reliably than others",
            ),
            Question::new(
                "q3",
                "Which of your existing workflows did it change?",
                "Writing reports got easier, docs lookup got faster",
            ),
            Question::new(
                "q4",
                "Did you notice limitations, pitfalls or things worth improving?",
                "\"Long context is unstable\", \"completions drift off\"",
            ),
        ],
    )
}

/// Weekly: release incident review.
pub fn weekly_release_review() -> Template {
    template(
        "weekly-001-q4",
        "Release Incident Review",
        "Record a problem that appeared after a launch and reflect on the root cause.",
        "Weekly Review",
        vec![
            Question::new(
                "q1",
                "What product or feature launched, and what went wrong?",
                "\"Users could not open the page after the new entry point shipped\"",
            ),
            Question::new(
                "q2",
                "How did you learn about it: internal testing or user feedback?",
                "Did you respond right away? Was it easy to reproduce?",
            ),
            Question::new(
                "q3",
                "What was the root cause: process, technology, collaboration or a misunderstanding?",
                "\"Different readings of the copy led to missing tracking\"",
            ),
            Question::new(
                "q4",
                "What did you reflect on, and how will you improve?",
                "Add a checklist, introduce earlier test scenarios",
            ),
        ],
    )
}

/// Weekly: company updates and personal understanding.
pub fn weekly_company_updates() -> Template {
    template(
        "weekly-001-q5",
        "Company Updates",
        "Record how you understand and respond to all-hands or strategy announcements.",
        "Weekly Review",
        vec![
            Question::new(
                "q1",
                "What company-wide or strategic messages were shared this week?",
                "\"AI first\", \"strengthen localization\"",
            ),
            Question::new(
                "q2",
                "How do you read this direction, and how does it relate to your daily work?",
                "Does it affect the modules you own or how you collaborate?",
            ),
            Question::new(
                "q3",
                "Did it give you new motivation, goals or pressure?",
                "Expectations on speed, shifts in required skills",
            ),
            Question::new(
                "q4",
                "What do you agree or disagree with, and why?",
                "\"AI first does not fit every process\"",
            ),
        ],
    )
}

/// Weekly: reflection and trend insights.
pub fn weekly_trends() -> Template {
    template(
        "weekly-001-q6",
        "Reflection and Trends",
        "Reflect on your own pace, industry trends or working habits.",
        "Weekly Review",
        vec![
            Question::new(
                "q1",
                "Did anything this week make you stop and think?",
                "\"I started rethinking what good output looks like\"",
            ),
            Question::new(
                "q2",
                "What problems or strengths did you notice in your pace, habits or role?",
                "\"I rely on AI too much and stopped checking the logic\"",
            ),
            Question::new(
                "q3",
                "Did you notice trends, changes or signals worth watching?",
                "\"The team has started reviewing mistakes more proactively\"",
            ),
            Question::new(
                "q4",
                "How do you want to adjust yourself or move the team forward?",
                "\"Write at least one reflective report a week\"",
            ),
        ],
    )
}

/// Every built-in template in catalog order.
pub fn all() -> Vec<Template> {
    vec![
        problem_solving(),
        progress_report(),
        thinking_log(),
        weekly_discussion_insights(),
        weekly_troubleshooting(),
        weekly_ai_tools(),
        weekly_release_review(),
        weekly_company_updates(),
        weekly_trends(),
    ]
}
