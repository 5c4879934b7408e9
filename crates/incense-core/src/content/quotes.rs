use super::Quote;

/// Order matters: selection indexes into this slice.
pub static QUOTES: &[Quote] = &[
    Quote {
        text: "Nature does not hurry, yet everything is accomplished.",
        author: "Lao Tzu",
    },
    Quote {
        text: "The quieter you become, the more you are able to hear.",
        author: "Rumi",
    },
    Quote {
        text: "Sitting quietly, doing nothing, spring comes, and the grass grows by itself.",
        author: "Zenrin Kushu",
    },
    Quote {
        text: "You have power over your mind, not outside events. Realize this, and you will find strength.",
        author: "Marcus Aurelius",
    },
    Quote {
        text: "It is not that we have a short time to live, but that we waste a lot of it.",
        author: "Seneca",
    },
    Quote {
        text: "An old silent pond. A frog jumps into the pond. Splash! Silence again.",
        author: "Matsuo Basho",
    },
    Quote {
        text: "Smile, breathe and go slowly.",
        author: "Thich Nhat Hanh",
    },
    Quote {
        text: "In the beginner's mind there are many possibilities, in the expert's mind there are few.",
        author: "Shunryu Suzuki",
    },
    Quote {
        text: "As if you could kill time without injuring eternity.",
        author: "Henry David Thoreau",
    },
    Quote {
        text: "Muddy water is best cleared by leaving it alone.",
        author: "Alan Watts",
    },
    Quote {
        text: "Do every act of your life as though it were the very last act of your life.",
        author: "Marcus Aurelius",
    },
    Quote {
        text: "Wherever you are, be all there.",
        author: "Jim Elliot",
    },
    Quote {
        text: "Knowing others is intelligence; knowing yourself is true wisdom.",
        author: "Lao Tzu",
    },
];
