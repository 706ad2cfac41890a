//! Named character entity tables.
//!
//! Both tables are ordered by code point so escaping can binary search them.
//! Names are stored without the surrounding `&` and `;`.

/// A single named entity: the name and the scalar it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeEntry {
    pub name: &'static str,
    pub ch: char,
}

impl EscapeEntry {
    const fn new(name: &'static str, ch: char) -> Self {
        Self { name, ch }
    }
}

/// Compact table used when escaping for markup that may keep non-ASCII text.
///
/// This is also the only table consulted when decoding named entities.
pub static HTML_ESCAPES: &[EscapeEntry] = &[
    // Markup specials
    EscapeEntry::new("quot", '\u{0022}'),
    EscapeEntry::new("amp", '\u{0026}'),
    EscapeEntry::new("apos", '\u{0027}'),
    EscapeEntry::new("lt", '\u{003C}'),
    EscapeEntry::new("gt", '\u{003E}'),

    // Latin extended
    EscapeEntry::new("OElig", '\u{0152}'),
    EscapeEntry::new("oelig", '\u{0153}'),
    EscapeEntry::new("Scaron", '\u{0160}'),
    EscapeEntry::new("scaron", '\u{0161}'),
    EscapeEntry::new("Yuml", '\u{0178}'),

    // Spacing modifier letters
    EscapeEntry::new("circ", '\u{02C6}'),
    EscapeEntry::new("tilde", '\u{02DC}'),

    // General punctuation
    EscapeEntry::new("ensp", '\u{2002}'),
    EscapeEntry::new("emsp", '\u{2003}'),
    EscapeEntry::new("thinsp", '\u{2009}'),
    EscapeEntry::new("zwnj", '\u{200C}'),
    EscapeEntry::new("zwj", '\u{200D}'),
    EscapeEntry::new("lrm", '\u{200E}'),
    EscapeEntry::new("rlm", '\u{200F}'),
    EscapeEntry::new("ndash", '\u{2013}'),
    EscapeEntry::new("mdash", '\u{2014}'),
    EscapeEntry::new("lsquo", '\u{2018}'),
    EscapeEntry::new("rsquo", '\u{2019}'),
    EscapeEntry::new("sbquo", '\u{201A}'),
    EscapeEntry::new("ldquo", '\u{201C}'),
    EscapeEntry::new("rdquo", '\u{201D}'),
    EscapeEntry::new("bdquo", '\u{201E}'),
    EscapeEntry::new("dagger", '\u{2020}'),
    EscapeEntry::new("Dagger", '\u{2021}'),
    EscapeEntry::new("permil", '\u{2030}'),
    EscapeEntry::new("lsaquo", '\u{2039}'),
    EscapeEntry::new("rsaquo", '\u{203A}'),

    // Currency symbols
    EscapeEntry::new("euro", '\u{20AC}'),
];

/// Full XHTML 1.0 named entity set (special, Latin-1 and symbol groups),
/// used when the output must be plain ASCII.
pub static ASCII_HTML_ESCAPES: &[EscapeEntry] = &[
    // Markup specials
    EscapeEntry::new("quot", '\u{0022}'),
    EscapeEntry::new("amp", '\u{0026}'),
    EscapeEntry::new("apos", '\u{0027}'),
    EscapeEntry::new("lt", '\u{003C}'),
    EscapeEntry::new("gt", '\u{003E}'),

    // Latin-1 supplement
    EscapeEntry::new("nbsp", '\u{00A0}'),
    EscapeEntry::new("iexcl", '\u{00A1}'),
    EscapeEntry::new("cent", '\u{00A2}'),
    EscapeEntry::new("pound", '\u{00A3}'),
    EscapeEntry::new("curren", '\u{00A4}'),
    EscapeEntry::new("yen", '\u{00A5}'),
    EscapeEntry::new("brvbar", '\u{00A6}'),
    EscapeEntry::new("sect", '\u{00A7}'),
    EscapeEntry::new("uml", '\u{00A8}'),
    EscapeEntry::new("copy", '\u{00A9}'),
    EscapeEntry::new("ordf", '\u{00AA}'),
    EscapeEntry::new("laquo", '\u{00AB}'),
    EscapeEntry::new("not", '\u{00AC}'),
    EscapeEntry::new("shy", '\u{00AD}'),
    EscapeEntry::new("reg", '\u{00AE}'),
    EscapeEntry::new("macr", '\u{00AF}'),
    EscapeEntry::new("deg", '\u{00B0}'),
    EscapeEntry::new("plusmn", '\u{00B1}'),
    EscapeEntry::new("sup2", '\u{00B2}'),
    EscapeEntry::new("sup3", '\u{00B3}'),
    EscapeEntry::new("acute", '\u{00B4}'),
    EscapeEntry::new("micro", '\u{00B5}'),
    EscapeEntry::new("para", '\u{00B6}'),
    EscapeEntry::new("middot", '\u{00B7}'),
    EscapeEntry::new("cedil", '\u{00B8}'),
    EscapeEntry::new("sup1", '\u{00B9}'),
    EscapeEntry::new("ordm", '\u{00BA}'),
    EscapeEntry::new("raquo", '\u{00BB}'),
    EscapeEntry::new("frac14", '\u{00BC}'),
    EscapeEntry::new("frac12", '\u{00BD}'),
    EscapeEntry::new("frac34", '\u{00BE}'),
    EscapeEntry::new("iquest", '\u{00BF}'),
    EscapeEntry::new("Agrave", '\u{00C0}'),
    EscapeEntry::new("Aacute", '\u{00C1}'),
    EscapeEntry::new("Acirc", '\u{00C2}'),
    EscapeEntry::new("Atilde", '\u{00C3}'),
    EscapeEntry::new("Auml", '\u{00C4}'),
    EscapeEntry::new("Aring", '\u{00C5}'),
    EscapeEntry::new("AElig", '\u{00C6}'),
    EscapeEntry::new("Ccedil", '\u{00C7}'),
    EscapeEntry::new("Egrave", '\u{00C8}'),
    EscapeEntry::new("Eacute", '\u{00C9}'),
    EscapeEntry::new("Ecirc", '\u{00CA}'),
    EscapeEntry::new("Euml", '\u{00CB}'),
    EscapeEntry::new("Igrave", '\u{00CC}'),
    EscapeEntry::new("Iacute", '\u{00CD}'),
    EscapeEntry::new("Icirc", '\u{00CE}'),
    EscapeEntry::new("Iuml", '\u{00CF}'),
    EscapeEntry::new("ETH", '\u{00D0}'),
    EscapeEntry::new("Ntilde", '\u{00D1}'),
    EscapeEntry::new("Ograve", '\u{00D2}'),
    EscapeEntry::new("Oacute", '\u{00D3}'),
    EscapeEntry::new("Ocirc", '\u{00D4}'),
    EscapeEntry::new("Otilde", '\u{00D5}'),
    EscapeEntry::new("Ouml", '\u{00D6}'),
    EscapeEntry::new("times", '\u{00D7}'),
    EscapeEntry::new("Oslash", '\u{00D8}'),
    EscapeEntry::new("Ugrave", '\u{00D9}'),
    EscapeEntry::new("Uacute", '\u{00DA}'),
    EscapeEntry::new("Ucirc", '\u{00DB}'),
    EscapeEntry::new("Uuml", '\u{00DC}'),
    EscapeEntry::new("Yacute", '\u{00DD}'),
    EscapeEntry::new("THORN", '\u{00DE}'),
    EscapeEntry::new("szlig", '\u{00DF}'),
    EscapeEntry::new("agrave", '\u{00E0}'),
    EscapeEntry::new("aacute", '\u{00E1}'),
    EscapeEntry::new("acirc", '\u{00E2}'),
    EscapeEntry::new("atilde", '\u{00E3}'),
    EscapeEntry::new("auml", '\u{00E4}'),
    EscapeEntry::new("aring", '\u{00E5}'),
    EscapeEntry::new("aelig", '\u{00E6}'),
    EscapeEntry::new("ccedil", '\u{00E7}'),
    EscapeEntry::new("egrave", '\u{00E8}'),
    EscapeEntry::new("eacute", '\u{00E9}'),
    EscapeEntry::new("ecirc", '\u{00EA}'),
    EscapeEntry::new("euml", '\u{00EB}'),
    EscapeEntry::new("igrave", '\u{00EC}'),
    EscapeEntry::new("iacute", '\u{00ED}'),
    EscapeEntry::new("icirc", '\u{00EE}'),
    EscapeEntry::new("iuml", '\u{00EF}'),
    EscapeEntry::new("eth", '\u{00F0}'),
    EscapeEntry::new("ntilde", '\u{00F1}'),
    EscapeEntry::new("ograve", '\u{00F2}'),
    EscapeEntry::new("oacute", '\u{00F3}'),
    EscapeEntry::new("ocirc", '\u{00F4}'),
    EscapeEntry::new("otilde", '\u{00F5}'),
    EscapeEntry::new("ouml", '\u{00F6}'),
    EscapeEntry::new("divide", '\u{00F7}'),
    EscapeEntry::new("oslash", '\u{00F8}'),
    EscapeEntry::new("ugrave", '\u{00F9}'),
    EscapeEntry::new("uacute", '\u{00FA}'),
    EscapeEntry::new("ucirc", '\u{00FB}'),
    EscapeEntry::new("uuml", '\u{00FC}'),
    EscapeEntry::new("yacute", '\u{00FD}'),
    EscapeEntry::new("thorn", '\u{00FE}'),
    EscapeEntry::new("yuml", '\u{00FF}'),

    // Latin extended
    EscapeEntry::new("OElig", '\u{0152}'),
    EscapeEntry::new("oelig", '\u{0153}'),
    EscapeEntry::new("Scaron", '\u{0160}'),
    EscapeEntry::new("scaron", '\u{0161}'),
    EscapeEntry::new("Yuml", '\u{0178}'),
    EscapeEntry::new("fnof", '\u{0192}'),

    // Spacing modifier letters
    EscapeEntry::new("circ", '\u{02C6}'),
    EscapeEntry::new("tilde", '\u{02DC}'),

    // Greek
    EscapeEntry::new("Alpha", '\u{0391}'),
    EscapeEntry::new("Beta", '\u{0392}'),
    EscapeEntry::new("Gamma", '\u{0393}'),
    EscapeEntry::new("Delta", '\u{0394}'),
    EscapeEntry::new("Epsilon", '\u{0395}'),
    EscapeEntry::new("Zeta", '\u{0396}'),
    EscapeEntry::new("Eta", '\u{0397}'),
    EscapeEntry::new("Theta", '\u{0398}'),
    EscapeEntry::new("Iota", '\u{0399}'),
    EscapeEntry::new("Kappa", '\u{039A}'),
    EscapeEntry::new("Lambda", '\u{039B}'),
    EscapeEntry::new("Mu", '\u{039C}'),
    EscapeEntry::new("Nu", '\u{039D}'),
    EscapeEntry::new("Xi", '\u{039E}'),
    EscapeEntry::new("Omicron", '\u{039F}'),
    EscapeEntry::new("Pi", '\u{03A0}'),
    EscapeEntry::new("Rho", '\u{03A1}'),
    EscapeEntry::new("Sigma", '\u{03A3}'),
    EscapeEntry::new("Tau", '\u{03A4}'),
    EscapeEntry::new("Upsilon", '\u{03A5}'),
    EscapeEntry::new("Phi", '\u{03A6}'),
    EscapeEntry::new("Chi", '\u{03A7}'),
    EscapeEntry::new("Psi", '\u{03A8}'),
    EscapeEntry::new("Omega", '\u{03A9}'),
    EscapeEntry::new("alpha", '\u{03B1}'),
    EscapeEntry::new("beta", '\u{03B2}'),
    EscapeEntry::new("gamma", '\u{03B3}'),
    EscapeEntry::new("delta", '\u{03B4}'),
    EscapeEntry::new("epsilon", '\u{03B5}'),
    EscapeEntry::new("zeta", '\u{03B6}'),
    EscapeEntry::new("eta", '\u{03B7}'),
    EscapeEntry::new("theta", '\u{03B8}'),
    EscapeEntry::new("iota", '\u{03B9}'),
    EscapeEntry::new("kappa", '\u{03BA}'),
    EscapeEntry::new("lambda", '\u{03BB}'),
    EscapeEntry::new("mu", '\u{03BC}'),
    EscapeEntry::new("nu", '\u{03BD}'),
    EscapeEntry::new("xi", '\u{03BE}'),
    EscapeEntry::new("omicron", '\u{03BF}'),
    EscapeEntry::new("pi", '\u{03C0}'),
    EscapeEntry::new("rho", '\u{03C1}'),
    EscapeEntry::new("sigmaf", '\u{03C2}'),
    EscapeEntry::new("sigma", '\u{03C3}'),
    EscapeEntry::new("tau", '\u{03C4}'),
    EscapeEntry::new("upsilon", '\u{03C5}'),
    EscapeEntry::new("phi", '\u{03C6}'),
    EscapeEntry::new("chi", '\u{03C7}'),
    EscapeEntry::new("psi", '\u{03C8}'),
    EscapeEntry::new("omega", '\u{03C9}'),
    EscapeEntry::new("thetasym", '\u{03D1}'),
    EscapeEntry::new("upsih", '\u{03D2}'),
    EscapeEntry::new("piv", '\u{03D6}'),

    // General punctuation
    EscapeEntry::new("ensp", '\u{2002}'),
    EscapeEntry::new("emsp", '\u{2003}'),
    EscapeEntry::new("thinsp", '\u{2009}'),
    EscapeEntry::new("zwnj", '\u{200C}'),
    EscapeEntry::new("zwj", '\u{200D}'),
    EscapeEntry::new("lrm", '\u{200E}'),
    EscapeEntry::new("rlm", '\u{200F}'),
    EscapeEntry::new("ndash", '\u{2013}'),
    EscapeEntry::new("mdash", '\u{2014}'),
    EscapeEntry::new("lsquo", '\u{2018}'),
    EscapeEntry::new("rsquo", '\u{2019}'),
    EscapeEntry::new("sbquo", '\u{201A}'),
    EscapeEntry::new("ldquo", '\u{201C}'),
    EscapeEntry::new("rdquo", '\u{201D}'),
    EscapeEntry::new("bdquo", '\u{201E}'),
    EscapeEntry::new("dagger", '\u{2020}'),
    EscapeEntry::new("Dagger", '\u{2021}'),
    EscapeEntry::new("bull", '\u{2022}'),
    EscapeEntry::new("hellip", '\u{2026}'),
    EscapeEntry::new("permil", '\u{2030}'),
    EscapeEntry::new("prime", '\u{2032}'),
    EscapeEntry::new("Prime", '\u{2033}'),
    EscapeEntry::new("lsaquo", '\u{2039}'),
    EscapeEntry::new("rsaquo", '\u{203A}'),
    EscapeEntry::new("oline", '\u{203E}'),
    EscapeEntry::new("frasl", '\u{2044}'),

    // Currency symbols
    EscapeEntry::new("euro", '\u{20AC}'),

    // Letterlike symbols
    EscapeEntry::new("image", '\u{2111}'),
    EscapeEntry::new("weierp", '\u{2118}'),
    EscapeEntry::new("real", '\u{211C}'),
    EscapeEntry::new("trade", '\u{2122}'),
    EscapeEntry::new("alefsym", '\u{2135}'),

    // Arrows
    EscapeEntry::new("larr", '\u{2190}'),
    EscapeEntry::new("uarr", '\u{2191}'),
    EscapeEntry::new("rarr", '\u{2192}'),
    EscapeEntry::new("darr", '\u{2193}'),
    EscapeEntry::new("harr", '\u{2194}'),
    EscapeEntry::new("crarr", '\u{21B5}'),
    EscapeEntry::new("lArr", '\u{21D0}'),
    EscapeEntry::new("uArr", '\u{21D1}'),
    EscapeEntry::new("rArr", '\u{21D2}'),
    EscapeEntry::new("dArr", '\u{21D3}'),
    EscapeEntry::new("hArr", '\u{21D4}'),

    // Mathematical operators
    EscapeEntry::new("forall", '\u{2200}'),
    EscapeEntry::new("part", '\u{2202}'),
    EscapeEntry::new("exist", '\u{2203}'),
    EscapeEntry::new("empty", '\u{2205}'),
    EscapeEntry::new("nabla", '\u{2207}'),
    EscapeEntry::new("isin", '\u{2208}'),
    EscapeEntry::new("notin", '\u{2209}'),
    EscapeEntry::new("ni", '\u{220B}'),
    EscapeEntry::new("prod", '\u{220F}'),
    EscapeEntry::new("sum", '\u{2211}'),
    EscapeEntry::new("minus", '\u{2212}'),
    EscapeEntry::new("lowast", '\u{2217}'),
    EscapeEntry::new("radic", '\u{221A}'),
    EscapeEntry::new("prop", '\u{221D}'),
    EscapeEntry::new("infin", '\u{221E}'),
    EscapeEntry::new("ang", '\u{2220}'),
    EscapeEntry::new("and", '\u{2227}'),
    EscapeEntry::new("or", '\u{2228}'),
    EscapeEntry::new("cap", '\u{2229}'),
    EscapeEntry::new("cup", '\u{222A}'),
    EscapeEntry::new("int", '\u{222B}'),
    EscapeEntry::new("there4", '\u{2234}'),
    EscapeEntry::new("sim", '\u{223C}'),
    EscapeEntry::new("cong", '\u{2245}'),
    EscapeEntry::new("asymp", '\u{2248}'),
    EscapeEntry::new("ne", '\u{2260}'),
    EscapeEntry::new("equiv", '\u{2261}'),
    EscapeEntry::new("le", '\u{2264}'),
    EscapeEntry::new("ge", '\u{2265}'),
    EscapeEntry::new("sub", '\u{2282}'),
    EscapeEntry::new("sup", '\u{2283}'),
    EscapeEntry::new("nsub", '\u{2284}'),
    EscapeEntry::new("sube", '\u{2286}'),
    EscapeEntry::new("supe", '\u{2287}'),
    EscapeEntry::new("oplus", '\u{2295}'),
    EscapeEntry::new("otimes", '\u{2297}'),
    EscapeEntry::new("perp", '\u{22A5}'),
    EscapeEntry::new("sdot", '\u{22C5}'),

    // Miscellaneous technical
    EscapeEntry::new("lceil", '\u{2308}'),
    EscapeEntry::new("rceil", '\u{2309}'),
    EscapeEntry::new("lfloor", '\u{230A}'),
    EscapeEntry::new("rfloor", '\u{230B}'),
    EscapeEntry::new("lang", '\u{2329}'),
    EscapeEntry::new("rang", '\u{232A}'),

    // Geometric shapes and card suits
    EscapeEntry::new("loz", '\u{25CA}'),
    EscapeEntry::new("spades", '\u{2660}'),
    EscapeEntry::new("clubs", '\u{2663}'),
    EscapeEntry::new("hearts", '\u{2665}'),
    EscapeEntry::new("diams", '\u{2666}'),
];
