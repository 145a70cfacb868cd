//! Encouragement messages shown after completing a habit.
//!
//! Each coach style has its own pool; one message is drawn at random.

use crate::AiCoachStyle;
use rand::seq::SliceRandom;
use rand::Rng;

const PLAYFUL: &[&str] = &[
    "You just ninja'd that habit! 🥷",
    "Achievement unlocked: Awesome Human! 🏆",
    "That was so easy, you're basically cheating at life now! 😎",
    "High five from the habit gods! ✋",
    "You blinked and built a habit. That's your superpower! ⚡",
    "Look at you being all productive and stuff! 🌟",
    "Your future self is doing a happy dance right now! 💃",
    "That's one small step for you, one giant leap for your awesomeness! 🚀",
    "Habit streak: Officially on fire! 🔥",
    "You're collecting good habits like trading cards! 🎮",
];

const EMPATHETIC: &[&str] = &[
    "Even showing up counts. Proud of you. 💕",
    "That small step matters more than you know. ✨",
    "You're nurturing yourself in all the right ways. 🌱",
    "This is how lasting change happens, one tiny moment at a time. 🕰️",
    "Your commitment to yourself is beautiful to witness. 🌈",
    "Each small action is a form of self-care. Thank you for honoring yourself. 🙏",
    "This consistency is quietly transforming your life. Feel it? 💫",
    "You're exactly where you need to be on your journey. 🛤️",
    "That wasn't just a habit. That was an act of self-love. ❤️",
    "The smallest steps often lead to the most meaningful destinations. 🌅",
];

const MINIMALIST: &[&str] = &[
    "Done. ✓",
    "Progress made.",
    "Step taken.",
    "Habit formed.",
    "Moment captured.",
    "Forward motion.",
    "Small win.",
    "Present. Aware. Complete.",
    "One more. Good.",
    "Simplicity wins.",
];

const WISE: &[&str] = &[
    "Each tiny step reveals the path ahead. Well done.",
    "The river carves the canyon not by force, but by persistence.",
    "What you repeat, you become. Today you chose well.",
    "A small act, done daily, outweighs a grand gesture done once.",
    "The journey of a thousand miles continues with this step.",
    "Patience and practice. You honored both today.",
];

const FRIENDLY: &[&str] = &[
    "Hey, you did it! That's awesome progress today!",
    "Nice one! Knew you had it in you.",
    "Look at you go! Same time tomorrow?",
    "That's another one in the bag. Proud of you, friend!",
    "Boom, done! You're on a roll.",
    "Way to show up for yourself today!",
];

const COZY: &[&str] = &[
    "Purr-fect job on your habit today. *gentle purring*",
    "Curl up and enjoy this little win. You earned it. 🐾",
    "Warm tea, soft blanket, one more habit done. ☕",
    "*kneads blanket approvingly* Well done, human.",
    "A tiny habit, a cozy heart. 🧶",
    "You did the thing. Time for a well-deserved nap. 😺",
];

/// The message pool for a coach style
pub fn encouragements(style: AiCoachStyle) -> &'static [&'static str] {
    match style {
        AiCoachStyle::Playful => PLAYFUL,
        AiCoachStyle::Empathetic => EMPATHETIC,
        AiCoachStyle::Minimalist => MINIMALIST,
        AiCoachStyle::Wise => WISE,
        AiCoachStyle::Friendly => FRIENDLY,
        AiCoachStyle::Cozy => COZY,
    }
}

/// Pick a message for `style` using `rng`
pub fn random_encouragement<R: Rng + ?Sized>(style: AiCoachStyle, rng: &mut R) -> &'static str {
    encouragements(style)
        .choose(rng)
        .copied()
        .unwrap_or("Done. ✓")
}

/// Display title of a coach style
pub fn style_title(style: AiCoachStyle) -> &'static str {
    match style {
        AiCoachStyle::Playful => "Playful Friend",
        AiCoachStyle::Empathetic => "Empathetic Guide",
        AiCoachStyle::Minimalist => "Minimalist",
        AiCoachStyle::Wise => "Wise Mentor",
        AiCoachStyle::Friendly => "Supportive Friend",
        AiCoachStyle::Cozy => "Cozy Cat",
    }
}

/// One-line description of a coach style
pub fn style_description(style: AiCoachStyle) -> &'static str {
    match style {
        AiCoachStyle::Playful => "Fun, lighthearted encouragement with a touch of humor",
        AiCoachStyle::Empathetic => "Warm, supportive messages that acknowledge your journey",
        AiCoachStyle::Minimalist => "Simple, concise encouragement without the fluff",
        AiCoachStyle::Wise => "Thoughtful insights with a philosophical touch",
        AiCoachStyle::Friendly => "Casual, relatable encouragement like a close friend",
        AiCoachStyle::Cozy => "Gentle, comforting messages with a cozy vibe",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_style_has_messages() {
        for style in AiCoachStyle::ALL {
            assert!(
                !encouragements(style).is_empty(),
                "no messages for {}",
                style
            );
        }
    }

    #[test]
    fn test_random_message_comes_from_style_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let msg = random_encouragement(AiCoachStyle::Minimalist, &mut rng);
            assert!(MINIMALIST.contains(&msg));
        }
    }
}
