//! 폴백 템플릿 컨셉
//!
//! 생성 서비스가 없거나 실패했을 때 사용하는 결정적 템플릿입니다.
//! 항상 정확히 5개의 씬을 가집니다.

use crate::concept::{Scene, UgcConcept};
use crate::scraper::ProductSnapshot;

/// (화면, 디렉션) 고정 문구. 보이스오버는 [`scene_voiceover`] 에서 결정.
const SCENE_SHOTS: [(&str, &str); 5] = [
    (
        "Creator talking selfie-style, product in hand.",
        "Natural lighting, direct-to-camera intro.",
    ),
    (
        "Close-up of product packaging.",
        "Slow pan over key product details.",
    ),
    (
        "Product being used in everyday setting.",
        "Quick cuts showing setup and use.",
    ),
    (
        "Before/after reaction shot.",
        "Split-screen style comparison.",
    ),
    (
        "Creator sharing final thoughts.",
        "Direct testimonial with authentic smile.",
    ),
];

fn scene_voiceover(index: u32, name: &str) -> String {
    match index {
        1 => format!("I did not expect {name} to be this good."),
        2 => "First impression: it looks premium and super easy to use.".to_string(),
        3 => "It fits right into my day without any extra effort.".to_string(),
        4 => "I noticed a real difference almost immediately.".to_string(),
        _ => format!("If you're on the fence, {name} is genuinely worth a try."),
    }
}

/// 템플릿 컨셉 생성
///
/// `name` 은 이미 결정된 표시 이름이며, `product.title` 을 대체합니다.
pub fn fallback_concept(product: &ProductSnapshot, name: &str) -> UgcConcept {
    let scenes = SCENE_SHOTS
        .iter()
        .zip(1u32..)
        .map(|(&(visual, direction), index)| Scene {
            index,
            visual: visual.to_string(),
            direction: direction.to_string(),
            voiceover: scene_voiceover(index, name),
        })
        .collect();

    UgcConcept {
        product: ProductSnapshot {
            title: name.to_string(),
            ..product.clone()
        },
        hook: format!(
            "I found {name} and honestly didn't expect this much of a difference in one day."
        ),
        script: format!(
            "Okay, quick honest review. I started using {name} this week and it instantly became part of my routine. \
             What sold me was how easy it is and how quickly I noticed results. \
             If you're looking for something that feels simple but actually works, this is worth trying."
        ),
        scenes,
        voiceover: format!(
            "I found {name} and had to share it. It's super easy to use, fits into my routine, and I noticed a difference fast. \
             If you want something simple that actually delivers, you'll probably love this."
        ),
        call_to_action: format!("Tap the link and try {name} for yourself."),
    }
}
