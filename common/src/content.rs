//! 画面に表示する固定文言（CLIとWebで共通）

pub const MEDICAL_NOTICE: &str = "SkinEval is an informational tool only and does not provide medical diagnosis. \
Results are preliminary insights based on AI analysis and should not replace professional medical evaluation. \
Always consult a qualified dermatologist for proper diagnosis and treatment.";

pub const MEDICAL_DISCLAIMER: &str = "This analysis is for informational purposes only and is not a substitute \
for professional medical advice, diagnosis, or treatment. Always seek the advice of a qualified healthcare \
provider with any questions you may have regarding a medical condition.";

pub const PHOTO_GUIDELINES: &[&str] = &[
    "Ensure good lighting for clear visibility",
    "Hold camera steady and focus on the affected area",
    "Include surrounding skin for context",
    "Avoid shadows or glare on the skin",
    "Take photos in a well-lit environment",
];

pub const PRIVACY_POINTS: &[&str] = &[
    "Images are processed temporarily and not stored",
    "Analysis results are kept in your browser session only",
    "No account creation or personal information required",
    "All data is automatically cleared after 30 minutes",
    "No tracking or third-party data sharing",
];
