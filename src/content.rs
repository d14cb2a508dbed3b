//! Marketing Content
//!
//! Static copy for the public pages. Served as JSON by the web host and
//! rendered directly by the frontend.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPost {
    pub id: u32,
    pub title: &'static str,
    pub image: &'static str,
    pub excerpt: &'static str,
    pub body: &'static str,
}

pub static BLOG_POSTS: [BlogPost; 4] = [
    BlogPost {
        id: 1,
        title: "Meet 5 Women Over Dinner",
        image: "/3.jpg",
        excerpt: "Stories of connection and new friendships from our weekly dinners.",
        body: "Five women, one table and a menu none of them picked. By dessert they had a group chat, \
               a plan for the next weekend and the kind of easy laughter that usually takes years.",
    },
    BlogPost {
        id: 2,
        title: "Beyond Small Talk: The Courage to Connect",
        image: "/4.jpg",
        excerpt: "How real conversations at the table can change your perspective.",
        body: "Small talk keeps us safe. The conversations worth remembering start when somebody at \
               the table asks the second question instead of changing the subject.",
    },
    BlogPost {
        id: 3,
        title: "The Expat Experiences \u{2014} You\u{2019}re Not Alone",
        image: "/5.jpg",
        excerpt: "Finding community and belonging in a new city.",
        body: "Moving cities means starting over socially. Our expat members share how a weekly \
               dinner with strangers turned an unfamiliar place into somewhere that feels like home.",
    },
    BlogPost {
        id: 4,
        title: "Why We Dine With Strangers",
        image: "/6.webp",
        excerpt: "The science and stories behind our unique dinner format.",
        body: "Six seats, matched by personality, at a restaurant you have not tried yet. Here is \
               why that format works better than any networking event.",
    },
];

pub fn blog_post(id: u32) -> Option<&'static BlogPost> {
    BLOG_POSTS.iter().find(|post| post.id == id)
}

/// Look up a post from a route parameter
pub fn blog_post_by_slug(raw: &str) -> Option<&'static BlogPost> {
    raw.trim().parse::<u32>().ok().and_then(blog_post)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

pub static FAQ: [FaqEntry; 6] = [
    FaqEntry {
        question: "How does Bichance work?",
        answer: "Take the personality quiz, pick a dinner date in your city and we match you with \
                 five like-minded people at a restaurant near you.",
    },
    FaqEntry {
        question: "Who will I be dining with?",
        answer: "A group of six members matched on the answers from your onboarding journey.",
    },
    FaqEntry {
        question: "When do I find out where the dinner is?",
        answer: "The restaurant and your table name appear on your dashboard once matching is done.",
    },
    FaqEntry {
        question: "What does a membership include?",
        answer: "Every plan gives you access to all dinners in your city for the length of the plan, \
                 personalized matches and member-only offers.",
    },
    FaqEntry {
        question: "Can I change my meal preference?",
        answer: "You choose Veg or Non-Veg each time you book a dinner.",
    },
    FaqEntry {
        question: "How do I cancel my subscription?",
        answer: "Contact support@bichance.com and we will cancel it before the next billing period.",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub text: &'static str,
}

pub const ABOUT_HEADLINE: &str =
    "The real distance between you and the people you don\u{2019}t know is a warm \u{201c}Hello.\u{201d}";

pub const ABOUT_INTRO: &str = "We create opportunities for the magic of chance encounters: the \
    conversations you would have missed and the people you wouldn\u{2019}t have met. Take a chance, \
    have a seat. And just say hello.";

pub const VALUES: [Section; 4] = [
    Section {
        title: "Authenticity",
        text: "We believe in genuine connections and real experiences, not superficial networking.",
    },
    Section {
        title: "Quality Over Quantity",
        text: "We carefully curate our events and community to ensure meaningful interactions.",
    },
    Section {
        title: "Growth Mindset",
        text: "Every experience is an opportunity to learn, grow, and expand your horizons.",
    },
    Section {
        title: "Inclusivity",
        text: "We welcome people from all backgrounds and walks of life to join our community.",
    },
];

/// Landing page "how it works"
pub const HOW_IT_WORKS: [Section; 5] = [
    Section {
        title: "Tell us more about you",
        text: "Take a quick personality quiz, so we can match you with a group that vibes with your energy.",
    },
    Section {
        title: "Pick your dining date",
        text: "Choose from curated dining events near you.",
    },
    Section {
        title: "Get matched with like-minded individuals",
        text: "Our algorithm connects you with five others for an exciting social dining experience.",
    },
    Section {
        title: "Dine, laugh & connect",
        text: "Meet up, break the ice, and let the conversations flow naturally.",
    },
    Section {
        title: "Stay connected & keep stepping out",
        text: "Choose who you want to stay connected with and keep the conversation flowing.",
    },
];

pub const SUPPORT_EMAIL: &str = "support@bichance.com";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

pub const FOOTER_LINKS: [NavLink; 6] = [
    NavLink { label: "Home", path: "/" },
    NavLink { label: "About", path: "/about" },
    NavLink { label: "Blog", path: "/blog" },
    NavLink { label: "Pricing", path: "/pricing" },
    NavLink { label: "FAQ", path: "/faq" },
    NavLink { label: "Contact", path: "/contact-us" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_lookup() {
        assert_eq!(blog_post(2).map(|p| p.title), Some("Beyond Small Talk: The Courage to Connect"));
        assert!(blog_post(99).is_none());
        assert_eq!(blog_post_by_slug("4").map(|p| p.image), Some("/6.webp"));
        assert!(blog_post_by_slug("abc").is_none());
    }

    #[test]
    fn test_blog_ids_are_unique() {
        let mut ids: Vec<u32> = BLOG_POSTS.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), BLOG_POSTS.len());
    }

    #[test]
    fn test_footer_links_cover_public_pages() {
        assert!(FOOTER_LINKS.iter().any(|l| l.path == "/faq"));
        assert!(FOOTER_LINKS.iter().any(|l| l.path == "/contact-us"));
    }
}
