//! Built-in defaults used when nothing usable is on disk.

use once_cell::sync::Lazy;
use serde_json::{Map, Value, json};

/// Default settings, matching what the input method assumes when it has no config file.
pub static DEFAULT_CONFIG: Lazy<Map<String, Value>> = Lazy::new(|| {
    let defaults = json!({
        "candidateFontSize": 16,
        "selectedInputMethodId": "checj",
        "shiftKeyToToggleAlphabetMode": true,
        "useNotification": false,
        "inputSettings": {
            "chineseConversionEnabled": false,
            "associatedPhrasesEnabled": false,
            "shiftPunctuationForSymbolsEnabled": true,
            "shiftLetterForSymbolsEnabled": true,
            "wildcardMatchingEnabled": false,
            "clearOnErrors": false,
            "beepOnErrors": true,
            "reverseRadicalLookupEnabled": false
        }
    });

    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
});

/// One `label=characters` record per line. The first two lines are single
/// symbols shown at the top of the symbol menu.
pub const DEFAULT_SYMBOL_TABLE: &str = r#"…
※
常用符號=，、。．？！；︰‧‥﹐﹒˙·“”〝〞‵′〃～＄％＠＆＃＊
左右括號=（）「」〔〕｛｝〈〉『』《》【】﹙﹚﹝﹞﹛﹜
上下括號=︵︶﹁﹂︹︺︷︸︿﹀﹃﹄︽︾︻︼
希臘字母=αβγδεζηθικλμνξοπρστυφχψωΑΒΓΔΕΖΗΘΙΚΛΜΝΞΟΠΡΣΤΥΦΧΨΩ
數學符號=＋－＝≠≒√＜＞﹤﹥≦≧∩∪ˇ⊥∠∟⊿㏒㏑∫∮∵∴╳﹢
特殊圖形=↑↓←→↖↗↙↘㊣◎○●⊕⊙○●△▲☆★◇◆□■▽▼§￥〒￠￡※♀♂
Unicode=♨☀☁☂☃♠♥♣♦♩♪♫♬☺☻
單線框=├─┼┴┬┤┌┐╞═╪╡│▕└┘╭╮╰╯
雙線框=╔╦╗╠═╬╣╓╥╖╒╤╕║╚╩╝╟╫╢╙╨╜╞╪╡╘╧╛
填色方塊=＿ˍ▁▂▃▄▅▆▇█▏▎▍▌▋▊▉◢◣◥◤
線段=﹣﹦≡｜∣∥–︱—︳╴¯￣﹉﹊﹍﹎﹋﹌﹏︴∕﹨╱╲／＼"#;

/// Kana tables offered from the foreign-language symbol menu.
pub const DEFAULT_FOREIGN_LANGUAGES_SYMBOL_TABLE: &str = r#"日語(平假名)=あいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわゐゑをん
日語(平濁音)=がぎぐげござじずぜぞだぢづでどばぱびぴぶぷべぺぼぽ
日語(平小字)=ぁぃぅぇぉっゃゅょゎ
日語(片假名)=アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヰヱヲン
日語(片濁音)=ガギグゲゴザジズゼゾダヂヅデドバパビピブプベペボポヴ
日語(片小字)=ァィゥェォヵヶッャュョヮ
日語(片半角)=ｧｨｩｪｫｯｬｭｮｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜｦ"#;
