use super::{Chapter, Subject, Textbook};

const fn chapter(chapter_title: &'static str, slug: &'static str, file_path: &'static str) -> Chapter {
    Chapter {
        chapter_title,
        slug,
        file_path,
    }
}

pub(super) static SUBJECTS: &[Subject] = &[
    Subject {
        subject_name: "Indian History (Ancient, Medieval, Modern)",
        recommended_textbooks: &[
            Textbook {
                book_name: "History of Medieval India by Satish Chandra",
                slug: "history-of-medieval-india-by-satish-chandra",
                chapters: &[
                    chapter(
                        "Introduction to Medieval India",
                        "intro-medieval-india",
                        "/markdown/history-medieval-ch1.md",
                    ),
                    chapter(
                        "The Delhi Sultanate",
                        "delhi-sultanate",
                        "/markdown/history-medieval-ch2.md",
                    ),
                    chapter(
                        "Mughal Empire: Foundation",
                        "mughal-empire-foundation",
                        "/markdown/history-medieval-ch3.md",
                    ),
                    chapter(
                        "Mughal Empire: Zenith and Decline",
                        "mughal-empire-zenith-decline",
                        "/markdown/history-medieval-ch4.md",
                    ),
                ],
            },
            Textbook {
                book_name: "India's Struggle for Independence by Bipan Chandra",
                slug: "indias-struggle-for-independence-by-bipan-chandra",
                chapters: &[
                    chapter(
                        "Advent of Europeans",
                        "advent-europeans",
                        "/markdown/struggle-independence-ch1.md",
                    ),
                    chapter(
                        "Revolt of 1857",
                        "revolt-1857",
                        "/markdown/struggle-independence-ch2.md",
                    ),
                    chapter(
                        "Rise of Nationalism",
                        "rise-nationalism",
                        "/markdown/struggle-independence-ch3.md",
                    ),
                ],
            },
        ],
    },
    Subject {
        subject_name: "Indian Polity",
        recommended_textbooks: &[Textbook {
            book_name: "Indian Polity by M. Laxmikanth",
            slug: "indian-polity-by-m-laxmikanth",
            chapters: &[
                chapter(
                    "Historical Background",
                    "polity-historical-background",
                    "/markdown/indian-polity-ch1.md",
                ),
                chapter(
                    "Making of the Constitution",
                    "polity-making-constitution",
                    "/markdown/indian-polity-ch2.md",
                ),
                chapter(
                    "Preamble of the Constitution",
                    "polity-preamble",
                    "/markdown/indian-polity-ch3.md",
                ),
            ],
        }],
    },
];
