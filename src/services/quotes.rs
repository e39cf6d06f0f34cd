//! Motivational quote rotation
//!
//! Quotes are served from a shuffled deck so every quote is shown once before
//! any quote repeats.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Serialize;
use tracing::debug;

/// A quote and who said it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

/// Productivity, focus and motivation quotes
pub const QUOTES: &[Quote] = &[
    Quote {
        text: "Concentrate all your thoughts upon the work in hand. The sun's rays do not burn until brought to a focus.",
        author: "Alexander Graham Bell",
    },
    Quote {
        text: "The successful warrior is the average man with laser-like focus.",
        author: "Bruce Lee",
    },
    Quote {
        text: "The ability to concentrate and to use time well is everything.",
        author: "Lee Iacocca",
    },
    Quote {
        text: "Focus is the new IQ.",
        author: "Cal Newport",
    },
    Quote {
        text: "The more focused you are, the more successful you will be.",
        author: "Tony Robbins",
    },
    Quote {
        text: "Deep work is the ability to focus without distraction on a cognitively demanding task.",
        author: "Cal Newport",
    },
    Quote {
        text: "What you choose to focus on and what you choose to ignore plays in defining the quality of your life.",
        author: "Cal Newport",
    },
    Quote {
        text: "Clarity about what matters provides clarity about what does not.",
        author: "Cal Newport",
    },
    Quote {
        text: "Who you are, what you think, feel, and do, what you love—is the sum of what you focus on.",
        author: "Cal Newport",
    },
    Quote {
        text: "If you don't pay appropriate attention to what has your attention, it will take more of your attention than it deserves.",
        author: "David Allen",
    },
    Quote {
        text: "The key to success is to focus on goals, not obstacles.",
        author: "Unknown",
    },
    Quote {
        text: "Focused, hard work is the real key to success.",
        author: "John Carmack",
    },
    Quote {
        text: "Concentration is the secret of strength in politics, in war, in trade, in short, in all management of human affairs.",
        author: "Ralph Waldo Emerson",
    },
    Quote {
        text: "The difference between try and triumph is just a little umph!",
        author: "Marvin Phillips",
    },
    Quote {
        text: "Do the hard jobs first. The easy jobs will take care of themselves.",
        author: "Dale Carnegie",
    },
    Quote {
        text: "Focus on being productive instead of busy.",
        author: "Tim Ferriss",
    },
    Quote {
        text: "What you do today can improve all your tomorrows.",
        author: "Ralph Marston",
    },
    Quote {
        text: "Success always demands a greater effort.",
        author: "Winston Churchill",
    },
    Quote {
        text: "Opportunity is missed by most people because it is dressed in overalls and looks like work.",
        author: "Thomas Edison",
    },
    Quote {
        text: "Productivity is never an accident. It is always the result of a commitment to excellence, intelligent planning, and focused effort.",
        author: "Paul J. Meyer",
    },
    Quote {
        text: "Amateurs sit and wait for inspiration, the rest of us just get up and go to work.",
        author: "Stephen King",
    },
    Quote {
        text: "Start by doing what's necessary, then what's possible, and suddenly you are doing the impossible.",
        author: "Francis of Assisi",
    },
    Quote {
        text: "High-Quality Work Produced = (Time Spent) × (Intensity of Focus).",
        author: "Cal Newport",
    },
    Quote {
        text: "If you don't produce, you won't thrive—no matter how skilled or talented you are.",
        author: "Cal Newport",
    },
    Quote {
        text: "Happiness is the real sense of fulfillment that comes from hard work.",
        author: "Joseph Barbara",
    },
    Quote {
        text: "Genius is 10% inspiration, 90% perspiration.",
        author: "Thomas Edison",
    },
    Quote {
        text: "Effective performance is preceded by painstaking preparation.",
        author: "Brian Tracy",
    },
    Quote {
        text: "We are what we repeatedly do. Excellence then is not an act, but a habit.",
        author: "Aristotle",
    },
    Quote {
        text: "Nothing in this world can take the place of persistence. Persistence and determination alone are omnipotent.",
        author: "Calvin Coolidge",
    },
    Quote {
        text: "Patience, persistence and perspiration make an unbeatable combination for success.",
        author: "Napoleon Hill",
    },
    Quote {
        text: "It's not that I'm so smart, it's just that I stay with problems longer.",
        author: "Albert Einstein",
    },
    Quote {
        text: "Energy and persistence conquer all things.",
        author: "Benjamin Franklin",
    },
    Quote {
        text: "It does not matter how slowly you go as long as you do not stop.",
        author: "Confucius",
    },
    Quote {
        text: "Many of life's failures are people who did not realize how close they were to success when they gave up.",
        author: "Thomas Edison",
    },
    Quote {
        text: "Our greatest weakness lies in giving up. The most certain way to succeed is to always try just one more time.",
        author: "Thomas Edison",
    },
    Quote {
        text: "Perseverance is the hard work you do after you get tired of doing the hard work you already did.",
        author: "Newt Gingrich",
    },
    Quote {
        text: "A river cuts through rock not because of its power, but because of its persistence.",
        author: "James Watkins",
    },
    Quote {
        text: "You may encounter many defeats, but you must not be defeated.",
        author: "Maya Angelou",
    },
    Quote {
        text: "Success is the sum of small efforts, repeated day in and day out.",
        author: "Robert Collier",
    },
    Quote {
        text: "Success is not final, failure is not fatal: It is the courage to continue that counts.",
        author: "Winston Churchill",
    },
    Quote {
        text: "Success is the result of perfection, hard work, learning from failure, loyalty, and persistence.",
        author: "Colin Powell",
    },
    Quote {
        text: "The path to success is to take massive, determined action.",
        author: "Tony Robbins",
    },
    Quote {
        text: "Success is stumbling from failure to failure with no loss of enthusiasm.",
        author: "Winston Churchill",
    },
    Quote {
        text: "Success is focusing the full power of all you are on what you have a burning desire to achieve.",
        author: "Wilfred Peterson",
    },
    Quote {
        text: "The best way to predict your future is to create it.",
        author: "Abraham Lincoln",
    },
    Quote {
        text: "You don't have to see the whole staircase, just take the first step.",
        author: "Martin Luther King Jr.",
    },
    Quote {
        text: "Tomorrow becomes never. No matter how small the task, take the first step now!",
        author: "Tim Ferriss",
    },
    Quote {
        text: "Don't let what you cannot do interfere with what you can do.",
        author: "John Wooden",
    },
    Quote {
        text: "Never let the fear of striking out stop you from playing the game.",
        author: "Babe Ruth",
    },
    Quote {
        text: "Motivation is what gets you started. Habit is what keeps you going.",
        author: "Jim Ryun",
    },
    Quote {
        text: "You are braver than you believe, stronger than you seem and smarter than you think.",
        author: "A.A. Milne",
    },
    Quote {
        text: "If you want to make your dreams come true, the first thing you have to do is wake up.",
        author: "J.M. Power",
    },
    Quote {
        text: "The greatest weapon against stress is our ability to choose one thought over another.",
        author: "William James",
    },
    Quote {
        text: "Procrastination makes easy things hard and hard things harder.",
        author: "Mason Cooley",
    },
    Quote {
        text: "You don't have to be great to start, but you have to start to be great.",
        author: "Zig Ziglar",
    },
    Quote {
        text: "The way to get started is to quit talking and begin doing.",
        author: "Walt Disney",
    },
    Quote {
        text: "If we wait until we're ready, we'll be waiting for the rest of our lives.",
        author: "Lemony Snicket",
    },
    Quote {
        text: "Nobody can go back and start a new beginning, but anyone can start today and make a new ending.",
        author: "Maria Robinson",
    },
    Quote {
        text: "Education is the passport to the future, for tomorrow belongs to those who prepare for it today.",
        author: "Malcolm X",
    },
    Quote {
        text: "The beautiful thing about learning is that no one can take it away from you.",
        author: "B.B. King",
    },
    Quote {
        text: "The expert in anything was once a beginner.",
        author: "Helen Hayes",
    },
    Quote {
        text: "An investment in knowledge pays the best interest.",
        author: "Benjamin Franklin",
    },
    Quote {
        text: "Learn from yesterday. Live for today. Hope for tomorrow.",
        author: "Albert Einstein",
    },
    Quote {
        text: "I am always doing that which I cannot do, in order that I may learn how to do it.",
        author: "Pablo Picasso",
    },
    Quote {
        text: "Learning never exhausts the mind.",
        author: "Leonardo da Vinci",
    },
    Quote {
        text: "To know, is to know that you know nothing. That is the meaning of true knowledge.",
        author: "Socrates",
    },
    Quote {
        text: "The present moment is filled with joy and happiness. If you are attentive, you will see it.",
        author: "Thich Nhat Hanh",
    },
    Quote {
        text: "Do every act of your life as though it were the very last act of your life.",
        author: "Marcus Aurelius",
    },
    Quote {
        text: "The only way to do great work is to love what you do.",
        author: "Steve Jobs",
    },
    Quote {
        text: "Your work is going to fill a large part of your life. The only way to be truly satisfied is to do what you believe is great work.",
        author: "Steve Jobs",
    },
    Quote {
        text: "Don't count the days, make the days count.",
        author: "Muhammad Ali",
    },
    Quote {
        text: "Time is what we want most, but what we use worst.",
        author: "William Penn",
    },
    Quote {
        text: "Lost time is never found again.",
        author: "Benjamin Franklin",
    },
];

/// Shuffled, self-refilling sequence of quotes
#[derive(Debug)]
pub struct QuoteDeck {
    quotes: Vec<Quote>,
    shuffled: Vec<Quote>,
    /// Index of the quote handed out last, `None` before the first draw
    position: Option<usize>,
    rng: StdRng,
}

impl QuoteDeck {
    /// Create a deck over the built-in quotes
    pub fn new() -> Self {
        Self::with_rng(QUOTES.to_vec(), StdRng::from_entropy())
    }

    /// Create a deck with a fixed shuffle order
    pub fn seeded(quotes: Vec<Quote>, seed: u64) -> Self {
        Self::with_rng(quotes, StdRng::seed_from_u64(seed))
    }

    fn with_rng(quotes: Vec<Quote>, rng: StdRng) -> Self {
        let mut deck = Self {
            shuffled: Vec::with_capacity(quotes.len()),
            quotes,
            position: None,
            rng,
        };
        deck.shuffle();
        deck
    }

    fn shuffle(&mut self) {
        self.shuffled = self.quotes.clone();
        self.shuffled.shuffle(&mut self.rng);
        self.position = None;
    }

    /// Next quote in the shuffled order, reshuffling once the deck runs out
    pub fn next_quote(&mut self) -> Option<Quote> {
        let mut index = self.position.map_or(0, |i| i + 1);

        if index >= self.shuffled.len() {
            debug!("Quote deck exhausted, reshuffling {} quotes", self.quotes.len());
            self.shuffle();
            index = 0;
        }

        let quote = self.shuffled.get(index).copied()?;
        self.position = Some(index);
        Some(quote)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl Default for QuoteDeck {
    fn default() -> Self {
        Self::new()
    }
}
