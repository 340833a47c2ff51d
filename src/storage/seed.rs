//! First-run resource data.

use crate::models::NewResource;

const fn resource(
    title: &'static str,
    description: &'static str,
    url: &'static str,
    category: &'static str,
) -> NewResource {
    NewResource {
        title,
        description,
        url,
        category,
    }
}

/// Resources inserted into an empty `resources` table.
pub const DEFAULT_RESOURCES: &[NewResource] = &[
    // Crisis helplines (India)
    resource(
        "Vandrevala Foundation",
        "24/7 Mental Health Helpline: Call +91 9999 666 555",
        "https://www.vandrevalafoundation.com",
        "crisis",
    ),
    resource(
        "iCall",
        "Psychosocial helpline (Mon-Sat, 10AM-8PM): +91 91529 87821",
        "https://icallhelpline.org",
        "crisis",
    ),
    resource(
        "COOJ Mental Health Foundation",
        "Helpline for Goa: +91 98225 25200",
        "https://cooj.co.in",
        "crisis",
    ),
    // Therapy and counseling (India)
    resource(
        "The Mind Clinic",
        "Online therapy sessions (Pan-India)",
        "https://themindclan.com",
        "therapy",
    ),
    resource(
        "InnerHour",
        "Self-care app with Indian therapists",
        "https://www.theinnerhour.com",
        "therapy",
    ),
    resource(
        "Manas",
        "Free counseling by TISS students",
        "https://www.tiss.edu/manas",
        "therapy",
    ),
    // Self-help and education (India)
    resource(
        "Let's Talk About Mental Health",
        "Hindi/English mental health guides",
        "https://letstalkaboutmentalhealth.com.in",
        "self-help",
    ),
    resource(
        "The Health Collective",
        "Mental health stories & resources",
        "https://www.thehealthcollective.in",
        "education",
    ),
    // LGBTQ+ support (India)
    resource(
        "Sangath",
        "Mental health support for LGBTQ+",
        "https://sangath.in",
        "lgbtq",
    ),
    resource(
        "Nazariya",
        "Queer-affirmative counseling",
        "http://nazariyaqfrg.tumblr.com",
        "lgbtq",
    ),
    // Global
    resource(
        "National Suicide Prevention Lifeline",
        "24/7 free and confidential support",
        "https://988lifeline.org",
        "crisis",
    ),
    resource(
        "Crisis Text Line",
        "Text HOME to 741741 for 24/7 crisis support",
        "https://www.crisistextline.org",
        "crisis",
    ),
    resource(
        "Mindfulness Exercises",
        "Guided mindfulness and meditation exercises",
        "https://www.mindful.org/free-mindfulness-resources/",
        "self-help",
    ),
    resource(
        "7 Cups",
        "Free online therapy and counseling",
        "https://www.7cups.com",
        "therapy",
    ),
    resource(
        "Anger Management",
        "Healthy ways to process anger",
        "https://www.apa.org/topics/anger/control",
        "anger",
    ),
    resource(
        "Anxiety UK",
        "Support for anxiety and fear",
        "https://www.anxietyuk.org.uk",
        "fear",
    ),
    resource(
        "The Friendship Bench",
        "Combat loneliness",
        "https://friendshipbenchzimbabwe.org",
        "loneliness",
    ),
    resource(
        "Emotional Numbness Guide",
        "Understanding detachment",
        "https://www.healthline.com/health/emotional-numbness",
        "numbness",
    ),
];
