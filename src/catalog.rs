use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Chemistry,
    Physics,
}

impl Part {
    pub fn label(self) -> &'static str {
        match self {
            Part::Chemistry => "Chimie",
            Part::Physics => "Physique",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRecord {
    pub id: &'static str,
    /// Display label such as "C1" or "P8". Not sequential: there is no P7.
    pub number: &'static str,
    pub title: &'static str,
    pub part: Part,
    pub start_page: u32,
    pub end_page: u32,
}

impl ChapterRecord {
    pub fn contains(&self, page: u32) -> bool {
        self.start_page <= page && page <= self.end_page
    }

    pub fn page_count(&self) -> u32 {
        self.end_page - self.start_page + 1
    }
}

const fn chapter(
    id: &'static str,
    number: &'static str,
    title: &'static str,
    part: Part,
    start_page: u32,
    end_page: u32,
) -> ChapterRecord {
    ChapterRecord {
        id,
        number,
        title,
        part,
        start_page,
        end_page,
    }
}

// Chemistry first, then physics, ascending start page within each part.
// c3 and c4 both claim page 20; lookups resolve it to c3.
static CHAPTERS: [ChapterRecord; 23] = [
    chapter("c1", "C1", "Mélanges et corps purs", Part::Chemistry, 6, 10),
    chapter("c2", "C2", "Éléments, atomes, classification périodique", Part::Chemistry, 11, 16),
    chapter("c3", "C3", "Liaisons chimiques", Part::Chemistry, 17, 20),
    chapter("c4", "C4", "Mole, grandeurs molaires", Part::Chemistry, 20, 24),
    chapter("c5", "C5", "Réactions chimiques. Equation-bilan", Part::Chemistry, 25, 30),
    chapter("c6", "C6", "Généralités sur les solutions aqueuses", Part::Chemistry, 31, 33),
    chapter("c7", "C7", "Solution aqueuse acide", Part::Chemistry, 34, 39),
    chapter("c8", "C8", "Solution aqueuse basique", Part::Chemistry, 40, 43),
    chapter("c9", "C9", "Notion de pH – Indicateurs colorés", Part::Chemistry, 44, 47),
    chapter("c10", "C10", "Identification des ions", Part::Chemistry, 48, 51),
    chapter("p1", "P1", "Phénomènes d'électrisation", Part::Physics, 53, 56),
    chapter("p2", "P2", "Généralités sur le courant électrique", Part::Physics, 57, 59),
    chapter("p3", "P3", "Intensité du courant électrique", Part::Physics, 60, 63),
    chapter("p4", "P4", "Tension électrique", Part::Physics, 64, 67),
    chapter("p5", "P5", "Dipôles passifs", Part::Physics, 68, 73),
    chapter("p6", "P6", "Dipôles actifs", Part::Physics, 74, 79),
    chapter("p8", "P8", "Généralités sur le mouvement", Part::Physics, 80, 85),
    chapter("p9", "P9", "Généralités sur les forces", Part::Physics, 86, 90),
    chapter("p10", "P10", "Le poids – La masse", Part::Physics, 91, 95),
    chapter("p11", "P11", "Équilibre d'un solide", Part::Physics, 96, 102),
    chapter("p12", "P12", "Équilibre d'un solide mobile", Part::Physics, 103, 110),
    chapter("p13", "P13", "Propagation rectiligne de la lumière", Part::Physics, 111, 115),
    chapter("p14", "P14", "Réflexion de la lumière- Réfraction", Part::Physics, 116, 120),
];

/// Read-only handle on the booklet's chapter table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChapterCatalog;

impl ChapterCatalog {
    pub fn new() -> Self {
        ChapterCatalog
    }

    pub fn chapters(&self) -> &'static [ChapterRecord] {
        &CHAPTERS
    }

    pub fn chapters_by_part(&self, part: Part) -> Vec<&'static ChapterRecord> {
        CHAPTERS.iter().filter(|ch| ch.part == part).collect()
    }

    /// First chapter in table order whose range holds `page`. Overlapping
    /// ranges are settled by table order, so this stays a plain scan.
    pub fn find_chapter_for_page(&self, page: u32) -> Option<&'static ChapterRecord> {
        CHAPTERS.iter().find(|ch| ch.contains(page))
    }

    pub fn chapter_by_id(&self, id: &str) -> Option<&'static ChapterRecord> {
        CHAPTERS.iter().find(|ch| ch.id == id)
    }

    pub fn all_covered_pages(&self) -> Vec<u32> {
        let pages: BTreeSet<u32> = CHAPTERS
            .iter()
            .flat_map(|ch| ch.start_page..=ch.end_page)
            .collect();
        pages.into_iter().collect()
    }
}
