use leptos::prelude::*;

/// SVG-иконка по имени; неизвестное имя даёт пустой span
pub fn icon(name: &str) -> AnyView {
    let paths: &'static [&'static str] = match name {
        "plus" => &["M12 5v14", "M5 12h14"],
        "refresh" => &[
            "M21 12a9 9 0 0 0-9-9 9.75 9.75 0 0 0-6.74 2.74L3 8",
            "M3 3v5h5",
            "M3 12a9 9 0 0 0 9 9 9.75 9.75 0 0 0 6.74-2.74L21 16",
            "M16 16h5v5",
        ],
        "edit" => &["M12 20h9", "M16.5 3.5a2.12 2.12 0 0 1 3 3L7 19l-4 1 1-4Z"],
        "delete" => &[
            "M3 6h18",
            "M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6",
            "M8 6V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2",
        ],
        "save" => &[
            "M19 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h11l5 5v11a2 2 0 0 1-2 2z",
            "M17 21v-8H7v8",
            "M7 3v5h8",
        ],
        "x" => &["M18 6 6 18", "M6 6l12 12"],
        "arrow-up" => &["m5 12 7-7 7 7", "M12 19V5"],
        "arrow-down" => &["M12 5v14", "m19 12-7 7-7-7"],
        "menu" => &["M4 6h16", "M4 12h16", "M4 18h16"],
        "chevron-left" => &["m15 18-6-6 6-6"],
        "chevron-right" => &["m9 18 6-6-6-6"],
        "chevrons-left" => &["m11 17-5-5 5-5", "m18 17-5-5 5-5"],
        "chevrons-right" => &["m6 17 5-5-5-5", "m13 17 5-5-5-5"],
        "database" => &[
            "M3 5c0-1.7 4-3 9-3s9 1.3 9 3-4 3-9 3-9-1.3-9-3",
            "M3 5v14c0 1.7 4 3 9 3s9-1.3 9-3V5",
            "M3 12c0 1.7 4 3 9 3s9-1.3 9-3",
        ],
        "box" => &[
            "M21 16V8a2 2 0 0 0-1-1.73l-7-4a2 2 0 0 0-2 0l-7 4A2 2 0 0 0 3 8v8a2 2 0 0 0 1 1.73l7 4a2 2 0 0 0 2 0l7-4A2 2 0 0 0 21 16z",
            "M3.27 6.96 12 12l8.73-5.04",
            "M12 22V12",
        ],
        "tool" => &["M14.7 6.3a1 1 0 0 0 0 1.4l1.6 1.6a1 1 0 0 0 1.4 0l3.77-3.77a6 6 0 0 1-7.94 7.94l-6.91 6.91a2.12 2.12 0 0 1-3-3l6.91-6.91a6 6 0 0 1 7.94-7.94l-3.76 3.76z"],
        "list" => &["M8 6h13", "M8 12h13", "M8 18h13", "M3 6h.01", "M3 12h.01", "M3 18h.01"],
        "layers" => &[
            "m12 2 10 5-10 5L2 7z",
            "m2 17 10 5 10-5",
            "m2 12 10 5 10-5",
        ],
        "alert" => &[
            "M10.29 3.86 1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0z",
            "M12 9v4",
            "M12 17h.01",
        ],
        "steps" => &["M9 11l3 3L22 4", "M21 12v7a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h11"],
        _ => return view! { <span class="icon icon--empty"></span> }.into_any(),
    };

    view! {
        <svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
            {paths.iter().map(|d| view! { <path d=*d /> }).collect_view()}
        </svg>
    }
    .into_any()
}
