use crate::{Category, PageRef, ReviewItem, Severity};

/// Name of the sample document the built-in findings belong to.
pub const SAMPLE_DOCUMENT: &str = "Subject_Exam_Report_Final.pdf";

/// Closing remark shown under the overview charts.
pub const REVIEWER_NOTE: &str = "The manuscript demonstrates strong theoretical grounding in VQA and noise spectroscopy. However, the document currently suffers from artifacts typical of draft templates (placeholder text) and reference management software (junk metadata). The most critical non-formatting issue is the typo \"children\" (儿童) which likely obscures a scientific term about noise types. English captions in a Chinese report should also be addressed immediately.";

/// Build the built-in findings for the sample report, all open.
pub fn sample_findings() -> Vec<ReviewItem> {
    vec![
        // Critical
        ReviewItem::new(
            "c1",
            PageRef::Number(8),
            "Section 2 Title Area",
            "Template text remaining: \"[说明：介绍本项目的...]\"",
            "Delete all instructional text in brackets throughout the document (also found on Page 10 and Page 14).",
            Severity::Critical,
            Category::Format,
        ),
        ReviewItem::new(
            "c2",
            PageRef::Number(5),
            "Paragraph 2",
            "Contextual Typo: \"难以区分儿童\" (Difficult to distinguish children)",
            "This is likely a typo for \"难以区分不同噪声\" (distinct noises) or similar. \"Children\" makes no sense in this context.",
            Severity::Critical,
            Category::Language,
        ),
        ReviewItem::new(
            "c3",
            PageRef::Number(14),
            "Section 4",
            "Numbering Error: \"(1) (1) 研究视角...\"",
            "Remove the duplicate numbering. Change to \"(1) 研究视角...\".",
            Severity::Critical,
            Category::Format,
        ),
        // Figures
        ReviewItem::new(
            "i1",
            "4, 5, 6, 7, 8, 13",
            "Figures 1-6",
            "Figure Captions are in English (\"FIG. 1. Variational quantum computing...\")",
            "For a Chinese report, all figure captions MUST be in Chinese. English captions are only acceptable if the report is bilingual or if explicitly required, but titles like \"FIG 1\" should usually be \"图 1\".",
            Severity::Major,
            Category::Image,
        ),
        ReviewItem::new(
            "i2",
            PageRef::Number(4),
            "Figure 1",
            "Missing Image Citation",
            "This figure appears to be from a paper (likely Cerezo et al. or McClean et al.). You must add \"图片改编自 [参考文献]\" (Figure adapted from [Ref]) in the caption.",
            Severity::Major,
            Category::Image,
        ),
        // English abstract
        ReviewItem::new(
            "l1",
            PageRef::Number(3),
            "English Abstract Line 1",
            "Grammar: \"In Variational quantum algorithms (VQAs) are among...\"",
            "Remove \"In\". Start with \"Variational Quantum Algorithms (VQAs) are among...\".",
            Severity::Major,
            Category::Language,
        ),
        ReviewItem::new(
            "l2",
            PageRef::Number(3),
            "English Abstract",
            "Capitalization Inconsistency",
            "Standardize terms. \"barren plateaus\" vs \"Barren Plateaus\". \"Variational Quantum Algorithms\" should be title case when defined.",
            Severity::Minor,
            Category::Language,
        ),
        // References
        ReviewItem::new(
            "ref4",
            "16-17",
            "Bibliography Cross-Check",
            "Uncited References (Orphaned Bibliography)",
            "Detected several references in the bibliography that are never cited in the main text. Examples include: \"Cai, Z. (2023)\", \"Carroll, M. P. (2022)\", \"Christensen, B. G. (2019)\", and \"Dialameh...\". Action required: cite them in the text or remove them from the reference list.",
            Severity::Major,
            Category::Citation,
        ),
        ReviewItem::new(
            "ref1",
            "15-17",
            "References Section",
            "Metadata Junk in References",
            "Remove automated citation manager artifacts like \"APS Link\", \"McDermott Lab\", \"ScienceDirect\", \"Grafiati\", \"Quantum Journal\". These should not appear in a printed bibliography.",
            Severity::Major,
            Category::Citation,
        ),
        ReviewItem::new(
            "ref2",
            PageRef::Number(17),
            "Reference (Volpert)",
            "Incomplete Reference",
            "\"arXiv:2412.xxxx\" indicates a placeholder. Update with the actual number or check if it is published.",
            Severity::Major,
            Category::Citation,
        ),
        ReviewItem::new(
            "ref3",
            "General",
            "In-text Citations",
            "Inconsistency between \"et al.\" and \"等\"",
            "Ensure consistency. If writing in Chinese, prefer \"Name 等 (Year)\" or \"Name et al. (Year)\". Do not mix styles unless the specific template allows it.",
            Severity::Minor,
            Category::Citation,
        ),
        // Math / logic
        ReviewItem::new(
            "m1",
            PageRef::Number(7),
            "Theory Section",
            "Missing Math Symbol (f)",
            "The OCR text shows \"1/ 噪声\". It implies the \"f\" (frequency) is missing or in a font that did not print/scan. Ensure it reads \"1/f 噪声\" in italics.",
            Severity::Major,
            Category::Logic,
        ),
        ReviewItem::new(
            "m2",
            PageRef::Number(4),
            "Figure 1 Caption",
            "Typo in variable",
            "\"sample estimate of ℓθ (p, O)\" -> Should likely be \"ρ\" (rho) not \"p\".",
            Severity::Minor,
            Category::Logic,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_are_unique() {
        let items = sample_findings();
        let ids: HashSet<&str> = items.iter().map(|i| i.id()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn sample_is_all_open() {
        assert!(sample_findings().iter().all(|i| i.is_open()));
    }

    #[test]
    fn sample_has_thirteen_findings() {
        let items = sample_findings();
        assert_eq!(items.len(), 13);
        let critical = items
            .iter()
            .filter(|i| i.severity() == Severity::Critical)
            .count();
        assert_eq!(critical, 3);
    }
}
