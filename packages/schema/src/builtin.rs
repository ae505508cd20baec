use crate::definition::{PropSchema, TypeDefinition};

const TEXT_ALIGN: &[&str] = &["text-left", "text-center", "text-right", "text-justify"];
const INLINE_PADDING: &[&str] = &["p-0", "p-1", "p-2", "p-4"];
const INLINE_MARGIN: &[&str] = &["m-0", "m-1", "m-2", "m-4"];

/// Palette entries in display order
pub(crate) fn definitions() -> Vec<TypeDefinition> {
    vec![div(), section(), heading(), paragraph(), button(), image(), span()]
}

fn div() -> TypeDefinition {
    TypeDefinition::container("div", "Container")
        .prop(
            "backgroundColor",
            PropSchema::color("Background Color", "#ffffff").cascading(),
        )
        .prop(
            "padding",
            PropSchema::select("Padding", &["p-0", "p-2", "p-4", "p-6", "p-8"], "p-4").cascading(),
        )
        .prop(
            "margin",
            PropSchema::select("Margin", &["m-0", "m-2", "m-4", "m-6"], "m-0").cascading(),
        )
        .prop(
            "display",
            PropSchema::select("Layout", &["block", "flex", "grid"], "block").cascading(),
        )
        .prop(
            "flexDirection",
            PropSchema::select(
                "Flex Direction",
                &["flex-row", "flex-col", "flex-row-reverse", "flex-col-reverse"],
                "flex-row",
            )
            .cascading(),
        )
        .prop(
            "flexJustify",
            PropSchema::select(
                "Flex Justify",
                &[
                    "justify-start",
                    "justify-center",
                    "justify-end",
                    "justify-between",
                    "justify-around",
                ],
                "justify-start",
            )
            .cascading(),
        )
        .prop(
            "flexAlign",
            PropSchema::select(
                "Flex Align",
                &["items-start", "items-center", "items-end", "items-stretch"],
                "items-start",
            )
            .cascading(),
        )
        .prop(
            "gridCols",
            PropSchema::select(
                "Grid Columns",
                &["grid-cols-1", "grid-cols-2", "grid-cols-3", "grid-cols-4"],
                "grid-cols-1",
            )
            .cascading(),
        )
        .prop(
            "borderRadius",
            PropSchema::text("Border Radius", "0.25rem").cascading(),
        )
        .prop("width", PropSchema::text("Width", "100%").cascading())
        .prop("height", PropSchema::text("Height", "auto").cascading())
}

fn section() -> TypeDefinition {
    TypeDefinition::container("section", "Section")
        .prop(
            "backgroundColor",
            PropSchema::color("Background Color", "#f8fafc").cascading(),
        )
        .prop(
            "padding",
            PropSchema::select("Padding", &["p-0", "p-4", "p-8", "p-12"], "p-8").cascading(),
        )
        .prop(
            "margin",
            PropSchema::select("Margin", &["m-0", "m-4", "m-8"], "m-0").cascading(),
        )
        .prop(
            "borderRadius",
            PropSchema::text("Border Radius", "0.5rem").cascading(),
        )
}

fn heading() -> TypeDefinition {
    TypeDefinition::element("h1", "Heading")
        .prop("text", PropSchema::text("Text", "Heading Text"))
        .prop(
            "textAlign",
            PropSchema::select("Align", TEXT_ALIGN, "text-left").cascading(),
        )
        .prop("color", PropSchema::color("Text Color", "#000000").cascading())
        .prop(
            "backgroundColor",
            PropSchema::color("Background Color", "transparent").cascading(),
        )
        .prop(
            "padding",
            PropSchema::select("Padding", INLINE_PADDING, "p-0").cascading(),
        )
        .prop(
            "margin",
            PropSchema::select("Margin", INLINE_MARGIN, "m-0").cascading(),
        )
}

fn paragraph() -> TypeDefinition {
    TypeDefinition::element("p", "Paragraph")
        .prop(
            "text",
            PropSchema::text(
                "Text",
                "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nullam in dui mauris.",
            ),
        )
        .prop("color", PropSchema::color("Text Color", "#374151").cascading())
        .prop(
            "textAlign",
            PropSchema::select("Align", TEXT_ALIGN, "text-left").cascading(),
        )
        .prop(
            "backgroundColor",
            PropSchema::color("Background Color", "transparent").cascading(),
        )
        .prop(
            "padding",
            PropSchema::select("Padding", INLINE_PADDING, "p-0").cascading(),
        )
        .prop(
            "margin",
            PropSchema::select("Margin", INLINE_MARGIN, "m-0").cascading(),
        )
}

fn button() -> TypeDefinition {
    TypeDefinition::element("button", "Button")
        .prop("text", PropSchema::text("Label", "Click Me"))
        .prop("backgroundColor", PropSchema::color("Button Color", "#3b82f6"))
        .prop("color", PropSchema::color("Text Color", "#ffffff"))
        .prop(
            "padding",
            PropSchema::select("Padding", &["p-1", "p-2", "p-3", "p-4"], "p-2"),
        )
        .prop("margin", PropSchema::select("Margin", INLINE_MARGIN, "m-0"))
        .prop("borderRadius", PropSchema::text("Border Radius", "0.25rem"))
}

fn image() -> TypeDefinition {
    TypeDefinition::element("image", "Image")
        .leaf()
        .prop("src", PropSchema::text("Image URL", "/placeholder.svg"))
        .prop("alt", PropSchema::text("Alt Text", "Placeholder image"))
        .prop("width", PropSchema::text("Width", "100%"))
        .prop("height", PropSchema::text("Height", "auto"))
        .prop("padding", PropSchema::select("Padding", INLINE_PADDING, "p-0"))
        .prop("margin", PropSchema::select("Margin", INLINE_MARGIN, "m-0"))
        .prop("borderRadius", PropSchema::text("Border Radius", "0.25rem"))
}

fn span() -> TypeDefinition {
    TypeDefinition::element("span", "Text Span")
        .prop("text", PropSchema::text("Text", "Inline text"))
        .prop("color", PropSchema::color("Text Color", "#374151").cascading())
        .prop(
            "backgroundColor",
            PropSchema::color("Background Color", "transparent").cascading(),
        )
        .prop(
            "fontWeight",
            PropSchema::select(
                "Font Weight",
                &["font-normal", "font-bold", "font-light"],
                "font-normal",
            ),
        )
        .prop(
            "fontStyle",
            PropSchema::select("Font Style", &["not-italic", "italic"], "not-italic"),
        )
}
